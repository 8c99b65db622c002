//! Configuration management and validation.
//!
//! Provides configuration structures for the pipeline paths and the
//! scoring parameters used when normalizing and ranking result sheets.

use crate::constants::{
    DEFAULT_LOG_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_PER_SUBJECT_FULL_MARKS,
    DEFAULT_SECTION_BAND_WIDTH, DEFAULT_SECTION_COUNT, DEFAULT_WORKFLOW_LOG,
};
use crate::error::{ResultSheetError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Scoring parameters shared by the normalizer and the ranking engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Full marks of one subject (average marks are expressed against it)
    pub per_subject_full_marks: f64,

    /// Width of one section roll band
    pub section_band_width: i64,

    /// Number of section bands, at most six (A through F)
    pub section_count: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_subject_full_marks: DEFAULT_PER_SUBJECT_FULL_MARKS,
            section_band_width: DEFAULT_SECTION_BAND_WIDTH,
            section_count: DEFAULT_SECTION_COUNT,
        }
    }
}

impl ScoringConfig {
    /// Validate scoring parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.per_subject_full_marks.is_finite() && self.per_subject_full_marks > 0.0) {
            return Err(ResultSheetError::configuration(format!(
                "per_subject_full_marks must be positive, got {}",
                self.per_subject_full_marks
            )));
        }
        if self.section_band_width <= 0 {
            return Err(ResultSheetError::configuration(format!(
                "section_band_width must be positive, got {}",
                self.section_band_width
            )));
        }
        if self.section_count == 0 || self.section_count > DEFAULT_SECTION_COUNT {
            return Err(ResultSheetError::configuration(format!(
                "section_count must be between 1 and {}, got {}",
                DEFAULT_SECTION_COUNT, self.section_count
            )));
        }
        Ok(())
    }
}

/// Global configuration for a result sheet run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Explicit result sheet to process (otherwise discovered)
    pub input_path: Option<PathBuf>,

    /// Directory receiving cleaned result sheets
    pub output_dir: PathBuf,

    /// Workflow log shared with the other pipeline stages
    pub workflow_log: PathBuf,

    /// Per-run transform log, `None` disables file logging
    pub log_file: Option<PathBuf>,

    /// Fixed run timestamp (`YYYYMMDD_HHMMSS`), defaults to the current local time
    pub timestamp: Option<String>,

    /// Scoring parameters
    pub scoring: ScoringConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workflow_log: PathBuf::from(DEFAULT_WORKFLOW_LOG),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            timestamp: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the result sheet to process
    pub fn with_input_path(mut self, input_path: PathBuf) -> Self {
        self.input_path = Some(input_path);
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Set the workflow log path
    pub fn with_workflow_log(mut self, workflow_log: PathBuf) -> Self {
        self.workflow_log = workflow_log;
        self
    }

    /// Set or disable the transform log file
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Pin the run timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Configure scoring parameters
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(ResultSheetError::configuration("output_dir must not be empty"));
        }
        if self.workflow_log.as_os_str().is_empty() {
            return Err(ResultSheetError::configuration(
                "workflow_log must not be empty",
            ));
        }
        if let Some(timestamp) = &self.timestamp {
            if chrono::NaiveDateTime::parse_from_str(
                timestamp,
                crate::constants::RUN_TIMESTAMP_FORMAT,
            )
            .is_err()
            {
                return Err(ResultSheetError::configuration(format!(
                    "timestamp '{}' does not match YYYYMMDD_HHMMSS",
                    timestamp
                )));
            }
        }

        debug!("Validated configuration: {:?}", self);
        Ok(())
    }
}
