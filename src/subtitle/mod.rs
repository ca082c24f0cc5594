/*!
 * Subtitle parsing and formatting.
 *
 * This module contains components for reading SRT and ASS files into a
 * common document model and writing documents back out as SRT:
 * - `model`: Document and cue types
 * - `timestamp`: Timestamp codec for both dialects
 * - `srt`: SubRip parser and formatter
 * - `ass`: Advanced SubStation parser and override tag translation
 */

pub mod ass;
pub mod model;
pub mod srt;
pub mod timestamp;

pub use ass::{parse_ass, translate_override_tags};
pub use model::{Cue, Document};
pub use srt::{format_srt, parse_srt};
pub use timestamp::{format_timestamp, parse_timestamp, Dialect};

use crate::errors::SubtitleError;

/// Parse raw subtitle bytes written in `dialect`.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_document(
    data: &[u8],
    dialect: Dialect,
    ignore_minor_errors: bool,
) -> Result<Document, SubtitleError> {
    let content = String::from_utf8_lossy(data);
    match dialect {
        Dialect::Srt => parse_srt(&content, ignore_minor_errors),
        Dialect::Ass => parse_ass(&content),
    }
}
