/*!
 * Per-cue rule pipeline.
 *
 * Rules run in a fixed order for every cue:
 * 1. ASS override tags to generic format tags (ASS input only)
 * 2. drop the cue when it contains the configured substring (stops here)
 * 3. uppercase speaker labels
 * 4. short colon-terminated lines
 * 5. delimiter pairs, in configured order, one pass each
 * 6. whitespace normalization
 * 7. clear text with no letters left
 *
 * Labels go before delimiters so that a label next to an aside does not
 * leave stray punctuation behind. Cues are independent of each other.
 */

use log::{debug, info, warn};

use crate::app_config::RuleConfig;
use crate::errors::RuleError;
use crate::subtitle::ass::translate_override_tags;
use crate::subtitle::model::Document;
use crate::transform::delimiters::DelimiterPattern;
use crate::transform::rules::{
    self, RULE_CONVERT_ASS_TAGS, RULE_NORMALIZE_SPACES, RULE_REMOVE_LINE_IF_CONTAINS,
    RULE_REMOVE_NON_ALPHABETIC, RULE_REMOVE_SINGLE_LINE_COLON, RULE_REMOVE_UPPERCASE_COLON_WORDS,
};

/// One changed cue, as shown to the user before output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationRecord {
    /// 1-based position of the cue in the parsed document
    pub position: usize,
    pub original: String,
    pub transformed: String,
    /// Rules that changed the text, in the order they ran
    pub rules_applied: Vec<String>,
}

impl TransformationRecord {
    /// Whether the cue ended up with nothing to display
    pub fn is_dropped(&self) -> bool {
        self.transformed.is_empty()
    }
}

/// Ordered report of every cue a run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationLog {
    pub records: Vec<TransformationRecord>,
}

impl TransformationLog {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Cues that still have text after the run
    pub fn changed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_dropped()).count()
    }

    /// Cues that lost all their text
    pub fn dropped_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_dropped()).count()
    }

    /// Markdown report: the active rules followed by a table of changes
    pub fn to_markdown(&self, rules_json: &str) -> String {
        let mut out = String::from("# Subtitle Sanitizer\n\n## Rules\n```json\n");
        out.push_str(rules_json);
        out.push_str("\n```\n\n## Transformations\n");

        if self.records.is_empty() {
            out.push_str("Nothing to remove...\n");
            return out;
        }

        out.push_str("| Line# | Original | Transformed | Rules Applied |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for record in &self.records {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                record.position,
                markdown_cell(&record.original),
                markdown_cell(&record.transformed),
                record.rules_applied.join(", ")
            ));
        }
        out
    }
}

fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

/// Rule set prepared for repeated use: delimiter patterns are built once
#[derive(Debug, Clone)]
pub struct Transformer {
    rules: RuleConfig,
    delimiter_patterns: Vec<DelimiterPattern>,
    skipped: Vec<RuleError>,
}

impl Transformer {
    /// Prepare the rules. Delimiter pairs that cannot be compiled are logged and skipped.
    pub fn new(rules: &RuleConfig) -> Self {
        let mut delimiter_patterns = Vec::with_capacity(rules.remove_between_delimiters.len());
        let mut skipped = Vec::new();

        for delimiter in &rules.remove_between_delimiters {
            match DelimiterPattern::compile(delimiter) {
                Ok(pattern) => delimiter_patterns.push(pattern),
                Err(e) => {
                    warn!("Skipping delimiter pair: {}", e);
                    skipped.push(e);
                }
            }
        }

        Self {
            rules: rules.clone(),
            delimiter_patterns,
            skipped,
        }
    }

    /// Delimiter pairs that were left out
    pub fn skipped_delimiters(&self) -> &[RuleError] {
        &self.skipped
    }

    /// Run the pipeline on a single cue text, returning the new text and the rules that fired
    pub fn transform_text(&self, text: &str, source_was_ass: bool) -> (String, Vec<String>) {
        let mut applied = Vec::new();
        let mut current = text.to_string();

        let mut step = |current: &mut String, name: &str, next: String| {
            if next != *current {
                applied.push(name.to_string());
                *current = next;
            }
        };

        if source_was_ass {
            let next = translate_override_tags(&current);
            step(&mut current, RULE_CONVERT_ASS_TAGS, next);
        }

        if !self.rules.remove_line_if_contains.is_empty()
            && current.contains(&self.rules.remove_line_if_contains)
        {
            let next = rules::remove_if_contains(&current, &self.rules.remove_line_if_contains);
            step(&mut current, RULE_REMOVE_LINE_IF_CONTAINS, next);
            return (current, applied);
        }

        if self.rules.remove_uppercase_colon_words {
            let next = rules::remove_caps_label(&current);
            step(&mut current, RULE_REMOVE_UPPERCASE_COLON_WORDS, next);
        }

        if self.rules.remove_single_line_colon {
            let next = rules::remove_short_colon_clause(&current);
            step(&mut current, RULE_REMOVE_SINGLE_LINE_COLON, next);
        }

        for pattern in &self.delimiter_patterns {
            if current.is_empty() {
                break;
            }
            let next = pattern.remove_from(&current);
            step(&mut current, pattern.rule_name(), next);
        }

        let next = rules::normalize_whitespace(&current);
        step(&mut current, RULE_NORMALIZE_SPACES, next);

        let next = rules::clear_if_not_alphabetic(&current);
        step(&mut current, RULE_REMOVE_NON_ALPHABETIC, next);

        (current, applied)
    }

    /// Transform every cue into a new document.
    ///
    /// Cues left without text stay in the document so the report can show
    /// them; the SRT formatter is what leaves them out.
    pub fn apply(&self, doc: &Document, source_was_ass: bool) -> (Document, TransformationLog) {
        let mut log = TransformationLog::default();
        let mut cues = Vec::with_capacity(doc.cues.len());

        for (i, cue) in doc.cues.iter().enumerate() {
            let (text, rules_applied) = self.transform_text(&cue.text, source_was_ass);

            if !rules_applied.is_empty() {
                debug!(
                    "Cue {}: {:?} -> {:?} ({})",
                    i + 1,
                    cue.text,
                    text,
                    rules_applied.join(", ")
                );
                log.records.push(TransformationRecord {
                    position: i + 1,
                    original: cue.text.clone(),
                    transformed: text.clone(),
                    rules_applied,
                });
            }
            cues.push(cue.with_text(text));
        }

        info!(
            "{} of {} cues changed, {} left empty",
            log.len(),
            doc.cues.len(),
            log.dropped_count()
        );

        (Document::new(cues), log)
    }
}

/// Apply the configured rules to every cue of `doc`
pub fn apply_all(
    doc: &Document,
    rules: &RuleConfig,
    source_was_ass: bool,
) -> (Document, TransformationLog) {
    Transformer::new(rules).apply(doc, source_was_ass)
}
