//! Result Sheet Processor Library
//!
//! A Rust library for cleaning scraped exam result sheets and ranking the
//! qualifying students.
//!
//! This library provides tools for:
//! - Normalizing raw student records (scores, averages, roll derived fields)
//! - Correcting qualified students with zero total marks to absent
//! - Ranking qualifying students globally and within science section bands
//! - Selecting the input sheet from tagged arguments or the workflow log
//! - Writing the cleaned sheet and appending its workflow log entry

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod record_processor;

// Re-export commonly used types
pub use config::{PipelineConfig, ScoringConfig};
pub use error::{PipelineStage, Result, ResultSheetError};
pub use models::{Ranking, RunSummary, StudentRecord};
pub use processor::ResultSheetPipeline;
