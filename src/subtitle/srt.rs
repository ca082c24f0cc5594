/*!
 * SubRip parsing and formatting.
 *
 * Input is split into blank-line separated blocks. Each block holds an
 * optional numeric index, a `start --> end` timing line and one or more
 * text lines. Output is always canonical SRT with cues renumbered from 1.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use std::time::Duration;

use crate::errors::SubtitleError;
use crate::subtitle::model::{Cue, Document};
use crate::subtitle::timestamp::{format_timestamp, parse_timestamp, Dialect};

// @const: Loose timing line detector, used to tell an index line from a timing line
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+:\d+:\d+[,.]\d*\s*-->").expect("Invalid timing line regex")
});

const TIMING_SEPARATOR: &str = "-->";

/// Parse SRT content into a document.
///
/// With `ignore_minor_errors` a malformed block is logged and skipped;
/// otherwise the first malformed block fails the whole file.
pub fn parse_srt(content: &str, ignore_minor_errors: bool) -> Result<Document, SubtitleError> {
    let normalized = normalize_line_endings(content);
    let blocks = split_blocks(&normalized);

    let mut cues = Vec::with_capacity(blocks.len());
    for (block_no, block) in blocks.iter().enumerate() {
        match parse_block(block) {
            Ok(cue) => cues.push(cue),
            Err(e) if ignore_minor_errors => {
                warn!("Skipping malformed subtitle block {}: {}", block_no + 1, e);
            }
            Err(e) => return Err(e),
        }
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

/// Render a document as SRT.
///
/// Cues without any alphabetic character are left out and the remaining
/// ones are numbered 1..N without gaps.
pub fn format_srt(doc: &Document) -> String {
    let mut out = String::new();
    let mut index = 1;

    for cue in doc.cues.iter().filter(|c| c.has_alphabetic()) {
        if index > 1 {
            out.push('\n');
        }
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", index);
        let _ = writeln!(
            out,
            "{} {} {}",
            format_timestamp(cue.start),
            TIMING_SEPARATOR,
            format_timestamp(cue.end)
        );
        for line in cue.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(line);
            out.push('\n');
        }
        index += 1;
    }

    out
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

// Blocks are runs of non-blank lines; trailing spaces and tabs are removed
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line.trim_end_matches([' ', '\t']));
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Result<Cue, SubtitleError> {
    if lines.len() < 2 {
        return Err(SubtitleError::StructuralParse(format!(
            "block too short: {:?}",
            lines.first().copied().unwrap_or_default()
        )));
    }

    // The index line is optional and its value is never trusted
    let timing_pos = if TIMING_LINE_REGEX.is_match(lines[0]) { 0 } else { 1 };
    let (start, end) = parse_timing_line(lines[timing_pos])?;

    if start > end {
        debug!(
            "Cue ends before it starts ({} > {}), keeping as is",
            format_timestamp(start),
            format_timestamp(end)
        );
    }

    let text = lines[timing_pos + 1..].join("\n");
    Ok(Cue::new(0, start, end, text))
}

fn parse_timing_line(line: &str) -> Result<(Duration, Duration), SubtitleError> {
    let parts: Vec<&str> = line.split(TIMING_SEPARATOR).collect();
    if parts.len() != 2 {
        return Err(SubtitleError::StructuralParse(format!(
            "invalid timing line: {}",
            line
        )));
    }

    let start = parse_timestamp(parts[0], Dialect::Srt)?;
    let end = parse_timestamp(parts[1], Dialect::Srt)?;
    Ok((start, end))
}
