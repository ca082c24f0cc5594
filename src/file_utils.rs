use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SubtitleError;
use crate::subtitle::Dialect;

// @module: File and directory utilities

/// Suffix added to the input stem for sanitized output
pub const OUTPUT_SUFFIX: &str = "sanitized";

/// Extensions accepted as subtitle input
pub const SUBTITLE_EXTENSIONS: [&str; 2] = ["srt", "ass"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Check that `path` is an existing subtitle file and return its dialect
    pub fn validate_input<P: AsRef<Path>>(path: P) -> Result<Dialect> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }
        if path.is_dir() {
            return Err(anyhow!("Input is a directory; expected a file: {:?}", path));
        }
        Ok(Dialect::from_path(path)?)
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|e| SubtitleError::Io(format!("failed to read {:?}: {}", path, e)))?;
        Ok(data)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Output path for a sanitized subtitle
    // @params: input_file, overwrite
    /// `movie.en.ass` becomes `movie.en.sanitized.srt` in the same directory.
    /// Unless `overwrite` is set, an existing file is never reused: the first
    /// free `movie.en.sanitized_<n>.srt` is returned instead.
    pub fn resolve_output_path<P: AsRef<Path>>(input_file: P, overwrite: bool) -> PathBuf {
        let input_file = input_file.as_ref();
        let dir = input_file.parent().unwrap_or_else(|| Path::new(""));
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let candidate = dir.join(format!("{}.{}.srt", stem, OUTPUT_SUFFIX));
        if overwrite || !candidate.exists() {
            return candidate;
        }

        (1..)
            .map(|n| dir.join(format!("{}.{}_{}.srt", stem, OUTPUT_SUFFIX, n)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }

    /// Find subtitle files (`.srt`, `.ass`) below a directory, sorted by path.
    /// Files this tool produced are skipped so reruns do not sanitize their own output.
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_subtitle_file(path) && !Self::is_sanitized_output(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Whether the extension is one of the supported subtitle dialects
    pub fn is_subtitle_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                SUBTITLE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
            })
            .unwrap_or(false)
    }

    fn is_sanitized_output(path: &Path) -> bool {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let marker = format!(".{}", OUTPUT_SUFFIX);
        stem.ends_with(&marker)
            || stem
                .rsplit_once(&format!("{}_", marker))
                .is_some_and(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}
