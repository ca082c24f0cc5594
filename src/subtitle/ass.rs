/*!
 * Advanced SubStation Alpha parsing.
 *
 * Only the `[Events]` section is read. Each dialogue record has ten
 * comma-separated fields and the last one (the text) may itself contain
 * commas, so the record is split at most nine times.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::SubtitleError;
use crate::subtitle::model::{Cue, Document};
use crate::subtitle::srt::normalize_line_endings;
use crate::subtitle::timestamp::{format_timestamp, parse_timestamp, Dialect};

const EVENTS_HEADER: &str = "[Events]";
const DIALOGUE_MARKER: &str = "Dialogue:";
const COMMENT_MARKER: &str = "Comment:";
const LINE_BREAK_MARKER: &str = "\\N";

// Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
const FIELD_COUNT: usize = 10;
const START_FIELD: usize = 1;
const END_FIELD: usize = 2;
const TEXT_FIELD: usize = 9;

// @const: `{...}` override block
static OVERRIDE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]*)\}").expect("Invalid override block regex")
});

/// Parse ASS content into a document.
///
/// There is no best-effort mode: a record that cannot be split or timed
/// fails the whole file.
pub fn parse_ass(content: &str) -> Result<Document, SubtitleError> {
    let normalized = normalize_line_endings(content);

    let events = find_section(&normalized, EVENTS_HEADER).ok_or_else(|| {
        SubtitleError::StructuralParse(format!("no {} section found", EVENTS_HEADER))
    })?;

    let first_dialogue = events
        .iter()
        .position(|line| line.contains(DIALOGUE_MARKER))
        .ok_or_else(|| SubtitleError::StructuralParse("no dialogue lines found".to_string()))?;

    let mut cues = Vec::new();
    for record in &events[first_dialogue..] {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }
        if record.starts_with(COMMENT_MARKER) {
            debug!("Ignoring commented-out event: {}", record);
            continue;
        }
        cues.push(parse_dialogue(record)?);
    }

    if cues.is_empty() {
        return Err(SubtitleError::StructuralParse(
            "no subtitle cues found".to_string(),
        ));
    }

    for (i, cue) in cues.iter_mut().enumerate() {
        cue.index = i + 1;
    }

    Ok(Document::new(cues))
}

/// Translate ASS override blocks into generic format tags.
///
/// `{\i1}` becomes `<i>`, `{\b0}` becomes `</b>` and so on for bold,
/// italic, underline and strike. Every other override code is dropped.
/// Braces without a backslash are not override blocks and stay as they are.
pub fn translate_override_tags(text: &str) -> String {
    OVERRIDE_BLOCK_REGEX
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            if !body.contains('\\') {
                return caps[0].to_string();
            }
            body.split('\\')
                .filter_map(format_tag_for)
                .collect::<String>()
        })
        .into_owned()
}

fn format_tag_for(code: &str) -> Option<&'static str> {
    match code.trim() {
        "b1" => Some("<b>"),
        "b0" => Some("</b>"),
        "i1" => Some("<i>"),
        "i0" => Some("</i>"),
        "u1" => Some("<u>"),
        "u0" => Some("</u>"),
        "s1" => Some("<s>"),
        "s0" => Some("</s>"),
        _ => None,
    }
}

// Lines between `header` and the next `[...]` header
fn find_section<'a>(content: &'a str, header: &str) -> Option<Vec<&'a str>> {
    let mut lines = content.split('\n');
    lines.by_ref().find(|line| line.trim() == header)?;

    Some(
        lines
            .take_while(|line| !is_section_header(line))
            .map(|line| line.trim_end_matches([' ', '\t']))
            .collect(),
    )
}

fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

fn parse_dialogue(record: &str) -> Result<Cue, SubtitleError> {
    let fields: Vec<&str> = record.splitn(FIELD_COUNT, ',').collect();
    if fields.len() < FIELD_COUNT {
        return Err(SubtitleError::StructuralParse(format!(
            "invalid dialogue line (expected {} fields, found {}): {}",
            FIELD_COUNT,
            fields.len(),
            record
        )));
    }

    let start = parse_timestamp(fields[START_FIELD], Dialect::Ass)?;
    let end = parse_timestamp(fields[END_FIELD], Dialect::Ass)?;
    if start > end {
        debug!(
            "Event ends before it starts ({} > {}), keeping as is",
            format_timestamp(start),
            format_timestamp(end)
        );
    }

    let text = fields[TEXT_FIELD].replace(LINE_BREAK_MARKER, "\n");
    Ok(Cue::new(0, start, end, text))
}
