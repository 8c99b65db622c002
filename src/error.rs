//! Error handling for result sheet processing.
//!
//! Provides error types with context for reading the scraped result sheet,
//! transforming records, and writing the cleaned output and workflow entry.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Configuration,
    Read,
    Transform,
    Write,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Configuration => "configuration",
            PipelineStage::Read => "read",
            PipelineStage::Transform => "transform",
            PipelineStage::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ResultSheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Result sheet not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("No result sheet selected: pass --input or an argument tagged '{tag}'")]
    NoInputSelected { tag: String },

    #[error("Invalid result sheet in file: {path} - {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Qualified record {index} (classRoll '{class_roll}') has no numeric gpaWithAdditional: {value}")]
    InvalidGpa {
        index: usize,
        class_roll: String,
        value: String,
    },

    #[error("Failed to write cleaned result sheet: {path} - {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Failed to append workflow log entry: {path} - {reason}")]
    WorkflowLogFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ResultSheetError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stage of the pipeline this error aborted
    pub fn stage(&self) -> PipelineStage {
        match self {
            ResultSheetError::Configuration { .. } | ResultSheetError::NoInputSelected { .. } => {
                PipelineStage::Configuration
            }
            ResultSheetError::InputNotFound { .. }
            | ResultSheetError::InvalidInput { .. }
            | ResultSheetError::Io(_) => PipelineStage::Read,
            ResultSheetError::InvalidGpa { .. } => PipelineStage::Transform,
            ResultSheetError::WriteFailed { .. } | ResultSheetError::WorkflowLogFailed { .. } => {
                PipelineStage::Write
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ResultSheetError>;
