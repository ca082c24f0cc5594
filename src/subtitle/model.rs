/*!
 * In-memory subtitle document.
 */

use std::time::Duration;

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: 1-based position; reassigned when formatting
    pub index: usize,

    // @field: Offset from media start
    pub start: Duration,

    // @field: Offset from media start (not validated against start)
    pub end: Duration,

    // @field: Caption text, visual lines separated by '\n'
    pub text: String,
}

impl Cue {
    pub fn new(index: usize, start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Cue {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Same timing, different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Cue {
            index: self.index,
            start: self.start,
            end: self.end,
            text: text.into(),
        }
    }

    /// Whether any character of the text is a letter, in any script
    pub fn has_alphabetic(&self) -> bool {
        has_alphabetic(&self.text)
    }

    /// Visual lines of the caption
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Ordered sequence of cues from one subtitle file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub cues: Vec<Cue>,
}

impl Document {
    pub fn new(cues: Vec<Cue>) -> Self {
        Document { cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Number of cues the formatter would emit
    pub fn displayable_count(&self) -> usize {
        self.cues.iter().filter(|c| c.has_alphabetic()).count()
    }
}

pub(crate) fn has_alphabetic(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}
