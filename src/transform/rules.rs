/*!
 * Individual text-rewrite rules.
 *
 * Every rule takes the current cue text and returns the rewritten text.
 * The pipeline compares input and output to decide whether the rule fired.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle::model::has_alphabetic;

/// Rule names as they appear in the transformation report
pub const RULE_CONVERT_ASS_TAGS: &str = "convertAssFormatTags";
pub const RULE_REMOVE_LINE_IF_CONTAINS: &str = "removeLineIfContains";
pub const RULE_REMOVE_UPPERCASE_COLON_WORDS: &str = "removeUppercaseColonWords";
pub const RULE_REMOVE_SINGLE_LINE_COLON: &str = "removeSingleLineColon";
pub const RULE_REMOVE_BETWEEN_DELIMITERS: &str = "removeBetweenDelimiters";
pub const RULE_NORMALIZE_SPACES: &str = "normalizeSpaces";
pub const RULE_REMOVE_NON_ALPHABETIC: &str = "removeNonAlphabetic";

/// Most words a colon-terminated line may have and still count as a lead-in
pub const MAX_COLON_CLAUSE_WORDS: usize = 3;

// @const: "NAME:" speaker label, two or more capitals
static UPPERCASE_COLON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\p{Lu}{2,}:[ \t]*").expect("Invalid uppercase label regex")
});

// @const: Whitespace runs inside a single line
static SPACES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}").expect("Invalid whitespace regex")
});

/// Remove every `NAME:` label, e.g. `"GUARD: Stop"` becomes `"Stop"`
pub fn remove_caps_label(text: &str) -> String {
    UPPERCASE_COLON_REGEX.replace_all(text, "").into_owned()
}

/// Drop each line that is a short lead-in ending with a colon, e.g. `"That woman said:"`
pub fn remove_short_colon_clause(text: &str) -> String {
    text.split('\n')
        .filter(|line| !is_short_colon_clause(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_short_colon_clause(line: &str) -> bool {
    match line.trim().strip_suffix(':') {
        Some(clause) => clause.split_whitespace().count() <= MAX_COLON_CLAUSE_WORDS,
        None => false,
    }
}

/// Empty the text when it contains `needle`. An empty needle never matches.
pub fn remove_if_contains(text: &str, needle: &str) -> String {
    if !needle.is_empty() && text.contains(needle) {
        String::new()
    } else {
        text.to_string()
    }
}

/// Collapse whitespace runs and trim every line, dropping lines left empty.
///
/// Line breaks survive, so a two-line caption stays two lines.
pub fn normalize_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| SPACES_REGEX.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Empty the text when it has no letter left in any script
pub fn clear_if_not_alphabetic(text: &str) -> String {
    if has_alphabetic(text) {
        text.to_string()
    } else {
        String::new()
    }
}
