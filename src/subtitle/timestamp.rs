/*!
 * Timestamp codec for the two supported dialects.
 *
 * SRT uses `HH:MM:SS,mmm`. ASS uses `H:MM:SS.ff` where the width of the
 * fractional part decides its unit, so `1.4`, `1.40` and `1.400` are all
 * the same instant.
 */

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::errors::SubtitleError;

/// Subtitle dialect, which fixes both the file grammar and the timestamp notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// SubRip (`.srt`)
    Srt,
    /// Advanced SubStation Alpha (`.ass`)
    Ass,
}

impl Dialect {
    /// Detect the dialect from a file extension (case-insensitive, with or without the dot)
    pub fn from_extension(ext: &str) -> Result<Self, SubtitleError> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "ass" => Ok(Self::Ass),
            other => Err(SubtitleError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Detect the dialect of a subtitle path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        match path.extension() {
            Some(ext) => Self::from_extension(&ext.to_string_lossy()),
            None => Err(SubtitleError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
        }
    }

    fn fraction_separator(self) -> char {
        match self {
            Self::Srt => ',',
            Self::Ass => '.',
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "srt"),
            Self::Ass => write!(f, "ass"),
        }
    }
}

/// Parse a timestamp written in the given dialect
pub fn parse_timestamp(text: &str, dialect: Dialect) -> Result<Duration, SubtitleError> {
    let trimmed = text.trim();
    let separator = dialect.fraction_separator();

    let segments: Vec<&str> = trimmed.split(separator).collect();
    if segments.len() != 2 {
        return Err(SubtitleError::timestamp(
            trimmed,
            format!("expected exactly one '{}' before the fraction", separator),
        ));
    }

    let hms: Vec<&str> = segments[0].split(':').collect();
    if hms.len() != 3 {
        return Err(SubtitleError::timestamp(trimmed, "expected hours:minutes:seconds"));
    }

    let hours = parse_field(trimmed, hms[0], "hours")?;
    let minutes = parse_field(trimmed, hms[1], "minutes")?;
    let seconds = parse_field(trimmed, hms[2], "seconds")?;
    let millis = match dialect {
        Dialect::Srt => parse_field(trimmed, segments[1], "milliseconds")?,
        Dialect::Ass => parse_ass_fraction(trimmed, segments[1])?,
    };

    let total_ms = total_millis(hours, minutes, seconds, millis)
        .ok_or_else(|| SubtitleError::timestamp(trimmed, "value out of range"))?;
    Ok(Duration::from_millis(total_ms))
}

fn total_millis(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<u64> {
    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes.checked_mul(60_000)?)?
        .checked_add(seconds.checked_mul(1_000)?)?
        .checked_add(millis)
}

/// Format a duration as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_timestamp(duration: Duration) -> String {
    let ms = duration.as_millis();
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

fn parse_field(input: &str, field: &str, name: &str) -> Result<u64, SubtitleError> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubtitleError::timestamp(
            input,
            format!("{} field '{}' is not a number", name, field),
        ));
    }
    field
        .parse::<u64>()
        .map_err(|e| SubtitleError::timestamp(input, format!("{} field: {}", name, e)))
}

// Digit count decides the unit: tenths, centiseconds, milliseconds.
// Anything past the third digit is dropped.
fn parse_ass_fraction(input: &str, fraction: &str) -> Result<u64, SubtitleError> {
    let fraction = fraction.trim();
    if fraction.is_empty() {
        return Ok(0);
    }

    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubtitleError::timestamp(
            input,
            format!("fraction field '{}' is not a number", fraction),
        ));
    }
    let digits = &fraction[..fraction.len().min(3)];
    let value = parse_field(input, digits, "fraction")?;

    Ok(match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    })
}
