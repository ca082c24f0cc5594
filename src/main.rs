// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use subtitle_sanitizer::app_config::{self, Config, LogLevel};
use subtitle_sanitizer::app_controller::{
    Controller, Decision, DecisionProvider, FixedDecision, SanitizedFile,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subsan
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the built-in rule set to a config file
    InitConfig {
        /// Where to write the config
        #[arg(value_name = "PATH", default_value = "subsan.json")]
        path: PathBuf,
    },
}

/// Subtitle Sanitizer - strip speaker labels, sound cues and music markers
///
/// Reads .srt or .ass subtitles, applies the configured cleanup rules, shows
/// what changed and writes a clean .srt next to the input.
#[derive(Parser, Debug)]
#[command(name = "subsan")]
#[command(version)]
#[command(about = "Subtitle cleanup tool")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subsan removes non-dialogue content from subtitle files.

EXAMPLES:
    subsan movie.srt                      # Review changes, then confirm
    subsan -y movie.ass                   # Write movie.sanitized.srt without asking
    subsan -n movie.srt                   # Only print the report
    subsan -y -c rules.json ~/shows/      # Every .srt/.ass below a directory
    subsan init-config rules.json         # Start a config from the defaults
    subsan completions bash > subsan.bash

CONFIGURATION:
    Without --config the built-in rules are used: speaker labels removed,
    (), [], {}, music symbols and * asides removed, cues mentioning
    ' music *' dropped.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle files or directories to process
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Rule configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip malformed SRT blocks instead of failing the file
    #[arg(short, long)]
    ignore_errors: bool,

    /// Apply changes without asking
    #[arg(short, long)]
    yes: bool,

    /// Overwrite an existing output file instead of picking a new name
    #[arg(short, long)]
    overwrite: bool,

    /// Print the report but write nothing
    #[arg(short = 'n', long, conflicts_with_all = ["yes", "overwrite"])]
    dry_run: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("?", "1;36"),
            Level::Trace => (".", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Prints the report and asks on stdin
struct PromptDecision;

impl DecisionProvider for PromptDecision {
    fn decide(&mut self, file: &SanitizedFile) -> Decision {
        println!("{}", file.report);
        print!(
            "Write sanitized {:?}? [Y]es / [n]o / [o]verwrite / [q]uit: ",
            file.input
        );
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => Decision::Skip,
            Ok(_) => parse_answer(&answer),
        }
    }
}

fn parse_answer(answer: &str) -> Decision {
    match answer.trim().to_lowercase().as_str() {
        "" | "y" | "yes" | "a" | "s" => Decision::Apply,
        "o" | "w" => Decision::Overwrite,
        "q" | "x" => Decision::Quit,
        _ => Decision::Skip,
    }
}

/// Prints the report, then gives a fixed answer
struct ReportingDecision(FixedDecision);

impl DecisionProvider for ReportingDecision {
    fn decide(&mut self, file: &SanitizedFile) -> Decision {
        println!("{}", file.report);
        self.0.decide(file)
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsan", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { path }) => {
            app_config::save_config(&path, &Config::default())?;
            info!("Default config written to {:?}", path);
            Ok(())
        }
        None => run_sanitize(cli),
    }
}

fn run_sanitize(options: CommandLineOptions) -> Result<()> {
    if options.inputs.is_empty() {
        return Err(anyhow!("INPUT is required when no subcommand is specified"));
    }

    let mut config = match &options.config {
        Some(path) => app_config::load_config(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => Config::default(),
    };

    if options.ignore_errors {
        config.ignore_minor_errors = true;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    // Just update the max level without reinitializing the logger
    log::set_max_level(level_filter(&config.log_level));

    let inputs = Controller::collect_inputs(&options.inputs)?;
    if inputs.is_empty() {
        warn!("Nothing to process");
        return Ok(());
    }

    let controller = Controller::with_config(config);

    let summary = if options.dry_run {
        controller.run_batch(&inputs, &mut ReportingDecision(FixedDecision(Decision::Skip)))
    } else if options.yes {
        let decision = if options.overwrite { Decision::Overwrite } else { Decision::Apply };
        controller.run_batch(&inputs, &mut ReportingDecision(FixedDecision(decision)))
    } else {
        controller.run_batch(&inputs, &mut PromptDecision)
    };

    if summary.failed > 0 {
        return Err(anyhow!("{} file(s) could not be processed", summary.failed));
    }
    Ok(())
}
