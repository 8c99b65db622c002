//! Command-line interface components.

use crate::config::PipelineConfig;
use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_WORKFLOW_LOG};
use crate::error::{Result, ResultSheetError};
use crate::models::RunSummary;
use crate::processor::discovery::InputDiscovery;

use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "result_sheet_processor")]
#[command(about = "Clean scraped exam result sheets and rank qualified students")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Workflow entries handed over by earlier stages (`<label>_resultSheetJson_<stamp>_:<path>`)
    #[arg(value_name = "TAGGED_ARGS")]
    pub tagged_args: Vec<String>,

    /// Result sheet to process, overrides tagged arguments and the workflow log
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving cleaned result sheets
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Workflow log read for the latest result sheet and appended with the output
    #[arg(short, long, default_value = DEFAULT_WORKFLOW_LOG)]
    pub workflow_log: PathBuf,

    /// Per-run transform log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Disable the transform log file
    #[arg(long)]
    pub no_log_file: bool,

    /// Fixed run timestamp (YYYYMMDD_HHMMSS) instead of the current time
    #[arg(long)]
    pub timestamp: Option<String>,

    /// List cleaned result sheets in the output directory and exit
    #[arg(long)]
    pub list_results: bool,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Get the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Transform log file, unless disabled
    pub fn log_file(&self) -> Option<&Path> {
        (!self.no_log_file).then_some(self.log_file.as_path())
    }

    /// Build the pipeline configuration
    ///
    /// `--input` wins over the last tagged argument; with neither, the
    /// pipeline falls back to the workflow log.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let discovery = InputDiscovery::new()?;
        let input_path = self.input.clone().or_else(|| {
            discovery
                .input_from_args(&self.tagged_args)
                .map(|entry| entry.path)
        });

        let mut config = PipelineConfig::default()
            .with_output_dir(self.output_dir.clone())
            .with_workflow_log(self.workflow_log.clone())
            .with_log_file(self.log_file().map(Path::to_path_buf));
        if let Some(input_path) = input_path {
            config = config.with_input_path(input_path);
        }
        if let Some(timestamp) = &self.timestamp {
            config = config.with_timestamp(timestamp.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Set up structured logging to stderr and the optional transform log
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("result_sheet_processor={}", log_level)));

    let file_layer = match args.log_file() {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| {
                ResultSheetError::configuration(format!(
                    "Cannot create log file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| ResultSheetError::configuration(format!("Logging already initialized: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print a coloured summary of a completed run
pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "Result sheet cleaned".bright_green().bold());
    println!(
        "  {} {}",
        "Input:".bright_cyan(),
        summary.input_path.display()
    );
    println!(
        "  {} {}",
        "Records read:".bright_cyan(),
        summary.records_read.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Qualified:".bright_cyan(),
        summary.qualified.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Corrected to absent:".bright_cyan(),
        summary.corrected_to_absent.to_string().bright_yellow()
    );
    println!(
        "  {} {}",
        "Ranked:".bright_cyan(),
        summary.ranked.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        summary.output_path.display()
    );
    println!(
        "  {} {}ms",
        "Time:".bright_cyan(),
        summary.processing_time_ms
    );
}

/// Print the cleaned result sheets found in an output directory
pub fn print_results(output_dir: &Path, results: &[PathBuf]) {
    if results.is_empty() {
        println!(
            "{} {}",
            "No cleaned result sheets in".bright_yellow(),
            output_dir.display()
        );
        return;
    }

    println!(
        "{} {}",
        "Cleaned result sheets in".bright_green().bold(),
        output_dir.display()
    );
    for (i, path) in results.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("  {}. {}", (i + 1).to_string().bright_yellow().bold(), name.bright_cyan());
    }
}
