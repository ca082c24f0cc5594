use anyhow::{Context, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::subtitle::{self, Dialect, Document};
use crate::transform::{TransformationLog, Transformer};

// @module: Application controller for subtitle sanitizing

/// What to do with a sanitized file, decided outside the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Write to a fresh output path
    Apply,
    /// Leave this file alone
    Skip,
    /// Write to the output path even if it exists
    Overwrite,
    /// Stop the whole batch
    Quit,
}

/// Source of per-file decisions (interactive prompt, fixed answer, tests)
pub trait DecisionProvider {
    fn decide(&mut self, file: &SanitizedFile) -> Decision;
}

/// Same answer for every file
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

impl DecisionProvider for FixedDecision {
    fn decide(&mut self, _file: &SanitizedFile) -> Decision {
        self.0
    }
}

/// Result of running the pipeline on one input, before anything is written
#[derive(Debug, Clone)]
pub struct SanitizedFile {
    pub input: PathBuf,
    pub dialect: Dialect,
    pub original: Document,
    pub document: Document,
    pub log: TransformationLog,
    /// Rendered SRT output
    pub output: String,
    /// Markdown report for display
    pub report: String,
}

/// What happened to one file of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Skipped,
    Quit,
}

/// Per-batch counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
    /// Set when the decision layer stopped the batch early
    pub aborted: bool,
}

/// Main application controller for subtitle sanitizing
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Prepared rule pipeline
    transformer: Transformer,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let transformer = Transformer::new(&config.rules);
        Self { config, transformer }
    }

    /// Parse, transform and format raw subtitle bytes
    pub fn sanitize_bytes(
        &self,
        data: &[u8],
        dialect: Dialect,
    ) -> Result<(Document, Document, TransformationLog, String), SubtitleError> {
        let original = subtitle::parse_document(data, dialect, self.config.ignore_minor_errors)?;
        let (document, log) = self.transformer.apply(&original, dialect == Dialect::Ass);
        let output = subtitle::format_srt(&document);
        Ok((original, document, log, output))
    }

    /// Run the pipeline on one file without writing anything
    pub fn sanitize_file<P: AsRef<Path>>(&self, input: P) -> Result<SanitizedFile> {
        let input = input.as_ref();
        let dialect = FileManager::validate_input(input)?;
        let data = FileManager::read_bytes(input)?;

        let (original, document, log, output) = self
            .sanitize_bytes(&data, dialect)
            .with_context(|| format!("Failed to parse {} subtitle {:?}", dialect, input))?;

        info!(
            "{:?}: {} cues parsed, {} changed, {} will be dropped",
            input,
            original.len(),
            log.len(),
            original.len() - document.displayable_count()
        );

        let report = log.to_markdown(&self.config.rules_json());
        Ok(SanitizedFile {
            input: input.to_path_buf(),
            dialect,
            original,
            document,
            log,
            output,
            report,
        })
    }

    /// Sanitize one file and write the output if the decision says so
    pub fn process_file<P: AsRef<Path>>(
        &self,
        input: P,
        decider: &mut dyn DecisionProvider,
    ) -> Result<FileOutcome> {
        let sanitized = self.sanitize_file(input)?;

        let overwrite = match decider.decide(&sanitized) {
            Decision::Quit => return Ok(FileOutcome::Quit),
            Decision::Skip => {
                info!("Skipped {:?}", sanitized.input);
                return Ok(FileOutcome::Skipped);
            }
            Decision::Apply => false,
            Decision::Overwrite => true,
        };

        let output_path = FileManager::resolve_output_path(&sanitized.input, overwrite);
        FileManager::write_to_file(&output_path, &sanitized.output)?;
        info!("Success: {:?}", output_path);

        Ok(FileOutcome::Written(output_path))
    }

    /// Process files one after another. A failing file is reported and
    /// skipped; only a `Quit` decision stops the rest of the batch.
    pub fn run_batch(
        &self,
        inputs: &[PathBuf],
        decider: &mut dyn DecisionProvider,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for (i, input) in inputs.iter().enumerate() {
            match self.process_file(input, decider) {
                Ok(FileOutcome::Written(path)) => summary.written.push(path),
                Ok(FileOutcome::Skipped) => summary.skipped += 1,
                Ok(FileOutcome::Quit) => {
                    let remaining = inputs.len() - i - 1;
                    if remaining > 0 {
                        warn!("Quit requested, {} file(s) left unprocessed", remaining);
                    }
                    summary.aborted = true;
                    break;
                }
                Err(e) => {
                    error!("Error processing {:?}: {:#}", input, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} written, {} skipped, {} failed",
            summary.written.len(),
            summary.skipped,
            summary.failed
        );
        summary
    }

    /// Expand directories into the subtitle files they contain
    pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for path in paths {
            if path.is_dir() {
                let found = FileManager::find_subtitle_files(path)?;
                if found.is_empty() {
                    warn!("No subtitle files found in {:?}", path);
                }
                inputs.extend(found);
            } else {
                inputs.push(path.clone());
            }
        }
        Ok(inputs)
    }
}
