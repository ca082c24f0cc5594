/*!
 * Removal patterns built from configured delimiter pairs.
 *
 * Delimiters come from user configuration, so both markers are escaped
 * before they are embedded in a pattern. Pairs that double as formatting
 * syntax get extra protection:
 * - `{` `}` never match across a backslash, so ASS override blocks like
 *   `{\b1}` survive;
 * - `<` `>` need at least three interior characters and never match across
 *   `\`, `/` or `=`, so `<i>`, `</i>` and `<font color=...>` survive.
 */

use regex::Regex;

use crate::app_config::Delimiter;
use crate::errors::RuleError;
use crate::transform::rules::RULE_REMOVE_BETWEEN_DELIMITERS;

/// Characters an aside may not contain, plus its minimum interior length
struct Protection {
    excluded: &'static str,
    min_len: usize,
}

const NO_PROTECTION: Protection = Protection { excluded: "", min_len: 0 };

fn protection_for(delimiter: &Delimiter) -> Protection {
    match (delimiter.left.as_str(), delimiter.right.as_str()) {
        ("{", "}") => Protection { excluded: r"\\", min_len: 0 },
        ("<", ">") => Protection { excluded: r"\\/=", min_len: 3 },
        _ => NO_PROTECTION,
    }
}

/// Compiled removal pattern for one delimiter pair
#[derive(Debug, Clone)]
pub struct DelimiterPattern {
    rule_name: String,
    regex: Regex,
}

impl DelimiterPattern {
    /// Build the pattern for a pair, failing on empty markers or an invalid pattern
    pub fn compile(delimiter: &Delimiter) -> Result<Self, RuleError> {
        let pattern = build_pattern(delimiter)?;
        let regex = Regex::new(&pattern).map_err(|e| RuleError::PatternCompile {
            left: delimiter.left.clone(),
            right: delimiter.right.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            rule_name: format!(
                "{}{}{}",
                RULE_REMOVE_BETWEEN_DELIMITERS, delimiter.left, delimiter.right
            ),
            regex,
        })
    }

    /// Name recorded in the report when this pair removes something
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Remove all non-overlapping asides in one left-to-right pass
    pub fn remove_from(&self, text: &str) -> String {
        self.regex.replace_all(text, "").into_owned()
    }
}

/// Pattern source for a delimiter pair, with both markers escaped
pub fn build_pattern(delimiter: &Delimiter) -> Result<String, RuleError> {
    if delimiter.left.is_empty() || delimiter.right.is_empty() {
        return Err(RuleError::PatternCompile {
            left: delimiter.left.clone(),
            right: delimiter.right.clone(),
            reason: "delimiter markers must not be empty".to_string(),
        });
    }

    let protection = protection_for(delimiter);
    let left = regex::escape(&delimiter.left);
    let right = regex::escape(&delimiter.right);
    let quantifier = match protection.min_len {
        0 => "*".to_string(),
        n => format!("{{{},}}", n),
    };

    let mut right_chars = delimiter.right.chars();
    let pattern = match (right_chars.next(), right_chars.next()) {
        // Single-char right marker: exclude it from the interior
        (Some(_), None) => format!(
            "{}[^{}{}]{}{}",
            left, right, protection.excluded, quantifier, right
        ),
        // Multi-char right marker: shortest interior up to its first occurrence
        _ => format!("{}(?s:.{}?){}", left, quantifier, right),
    };

    Ok(pattern)
}
