use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the rule configuration including loading,
/// defaulting and saving it.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Skip malformed SRT blocks instead of failing the whole file
    #[serde(default)]
    pub ignore_minor_errors: bool,

    /// Text cleanup rules
    #[serde(default)]
    pub rules: RuleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            ignore_minor_errors: false,
            rules: RuleConfig::default(),
        }
    }
}

impl Config {
    /// Pretty JSON of the active rules, used as the report header
    pub fn rules_json(&self) -> String {
        serde_json::to_string_pretty(&self.rules).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A (left, right) marker pair enclosing a removable aside
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Delimiter {
    pub left: String,
    pub right: String,
}

impl Delimiter {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Ordered set of text-rewrite rules
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RuleConfig {
    // @field: Strip "NAME:" speaker labels
    #[serde(default = "default_true")]
    pub remove_uppercase_colon_words: bool,

    // @field: Drop lines like "He said:" (three words or fewer)
    #[serde(default)]
    pub remove_single_line_colon: bool,

    // @field: Delimiter pairs, applied in order
    #[serde(default = "default_delimiters")]
    pub remove_between_delimiters: Vec<Delimiter>,

    // @field: Clear the cue when this substring appears
    #[serde(default = "default_remove_line_if_contains")]
    pub remove_line_if_contains: String,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            remove_uppercase_colon_words: default_true(),
            remove_single_line_colon: false,
            remove_between_delimiters: default_delimiters(),
            remove_line_if_contains: default_remove_line_if_contains(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Load configuration from a JSON file.
///
/// A missing or malformed file is an error; callers decide whether to fall
/// back to `Config::default()`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write configuration as pretty JSON
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let write_err = |reason: String| ConfigError::Write {
        path: path.display().to_string(),
        reason,
    };

    let json = serde_json::to_string_pretty(config).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, json).map_err(|e| write_err(e.to_string()))
}

fn default_true() -> bool {
    true
}

fn default_delimiters() -> Vec<Delimiter> {
    vec![
        Delimiter::new("(", ")"),
        Delimiter::new("[", "]"),
        Delimiter::new("{", "}"),
        Delimiter::new("¶", "¶"),
        Delimiter::new("♪", "♪"),
        Delimiter::new("♫", "♫"),
        Delimiter::new("♬", "♬"),
        Delimiter::new("♭", "♭"),
        Delimiter::new("*", "*"),
    ]
}

fn default_remove_line_if_contains() -> String {
    " music *".to_string()
}
