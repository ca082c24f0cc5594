/*!
 * Tests for the timestamp codec
 */

use std::time::Duration;
use subtitle_sanitizer::errors::SubtitleError;
use subtitle_sanitizer::subtitle::{format_timestamp, parse_timestamp, Dialect};

/// Test SRT timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidSrtTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let parsed = parse_timestamp(ts, Dialect::Srt).unwrap();
    assert_eq!(parsed, Duration::from_millis(5_025_678));

    assert_eq!(format_timestamp(parsed), ts);
}

#[test]
fn test_timestamp_roundTrip_withSampledDurations_shouldBeLossless() {
    let max_ms: u64 = 99 * 3_600_000 + 59 * 60_000 + 59 * 1_000 + 999;
    let samples = [0, 1, 999, 1_000, 61_001, 3_599_999, 3_600_000, 45_296_789, max_ms];

    for ms in samples {
        let d = Duration::from_millis(ms);
        let parsed = parse_timestamp(&format_timestamp(d), Dialect::Srt).unwrap();
        assert_eq!(parsed, d, "round trip failed for {} ms", ms);
    }
}

#[test]
fn test_formatTimestamp_withSubMillisecondPrecision_shouldTruncate() {
    let d = Duration::from_micros(1_234_999);
    assert_eq!(format_timestamp(d), "00:00:01,234");
}

#[test]
fn test_assTimestamp_withDifferentFractionWidths_shouldBeEquivalent() {
    let expected = Duration::from_millis(1_400);
    assert_eq!(parse_timestamp("0:00:01.4", Dialect::Ass).unwrap(), expected);
    assert_eq!(parse_timestamp("0:00:01.40", Dialect::Ass).unwrap(), expected);
    assert_eq!(parse_timestamp("0:00:01.400", Dialect::Ass).unwrap(), expected);
}

#[test]
fn test_assTimestamp_withVariants_shouldParse() {
    let cases = [
        ("0:00:01.87", 1_870),
        ("0:00:01.456", 1_456),
        ("0:00:01.45678", 1_456),
        (" 0:00:00.00 ", 0),
        ("1:02:03.", 3_723_000),
    ];
    for (input, ms) in cases {
        assert_eq!(
            parse_timestamp(input, Dialect::Ass).unwrap(),
            Duration::from_millis(ms),
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_parseTimestamp_withSurroundingWhitespace_shouldTrim() {
    assert_eq!(
        parse_timestamp("  00:00:02,500\t", Dialect::Srt).unwrap(),
        Duration::from_millis(2_500)
    );
}

#[test]
fn test_parseTimestamp_withMalformedInput_shouldFail() {
    let bad_srt = ["00:00:01.000", "00:01,000", "aa:00:01,000", "00:00:01,abc", "00:00:01,000,1", ""];
    for input in bad_srt {
        let result = parse_timestamp(input, Dialect::Srt);
        assert!(
            matches!(result, Err(SubtitleError::TimestampParse { .. })),
            "expected failure for {:?}",
            input
        );
    }

    let bad_ass = ["0:00:01", "0:01.50", "0:00:x1.50", "0:00:01.5x"];
    for input in bad_ass {
        assert!(parse_timestamp(input, Dialect::Ass).is_err(), "expected failure for {:?}", input);
    }
}

#[test]
fn test_parseTimestamp_withFailure_shouldDescribeInput() {
    let err = parse_timestamp("00:xx:01,000", Dialect::Srt).unwrap_err();
    let display = err.to_string();
    assert!(display.contains("00:xx:01,000"));
    assert!(display.contains("minutes"));
}

#[test]
fn test_dialect_fromExtension_shouldBeCaseInsensitive() {
    assert_eq!(Dialect::from_extension("SRT").unwrap(), Dialect::Srt);
    assert_eq!(Dialect::from_extension(".Ass").unwrap(), Dialect::Ass);
    assert_eq!(Dialect::from_path("dir/Movie.ASS").unwrap(), Dialect::Ass);
    assert!(matches!(
        Dialect::from_extension("vtt"),
        Err(SubtitleError::UnsupportedFormat(_))
    ));
    assert!(Dialect::from_path("no_extension").is_err());
}

#[test]
fn test_parseTimestamp_withHugeHours_shouldFailInsteadOfOverflowing() {
    let srt = parse_timestamp("99999999999999:00:00,000", Dialect::Srt);
    assert!(matches!(
        srt,
        Err(SubtitleError::TimestampParse { ref reason, .. }) if reason == "value out of range"
    ));

    let ass = parse_timestamp("99999999999999:00:00.00", Dialect::Ass);
    assert!(matches!(ass, Err(SubtitleError::TimestampParse { .. })));

    let largest_fit = parse_timestamp("5124095576:00:00,000", Dialect::Srt).unwrap();
    assert_eq!(largest_fit, Duration::from_millis(5_124_095_576 * 3_600_000));
}
