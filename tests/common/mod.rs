/*!
 * Common test utilities for the subtitle sanitizer test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small SRT file with a speaker label and a bracketed aside
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "1
00:00:01,000 --> 00:00:04,000
GUARD: (laughs) Hello

2
00:00:05,000 --> 00:00:09,000
[door slams]

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";
    create_test_file(dir, filename, content)
}

/// Helper to get the absolute path to a test fixture
pub fn fixture_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(relative_path);
    path
}
