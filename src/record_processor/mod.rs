//! Record processing module for scraped result sheets
//!
//! This module turns raw scraped student records into cleaned, ranked
//! records ready to be written out.
//!
//! # Architecture
//!
//! - [`processor`] - RecordProcessor struct and pipeline orchestration
//! - [`normalizer`] - per-record cleanup and derived fields
//! - [`classification`] - group, section and batch from the class roll
//! - [`ranking`] - global and section ranks among qualified students
//! - [`coercion`] - parse-or-default helpers for loosely typed fields
//! - [`stats`] - processing statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Normalization**: each record independently, order preserved
//! 2. **Ranking**: the whole batch at once, then ordered by roll
//!
//! Malformed numbers and roll segments fall back to defaults and are counted
//! in [`ProcessingStats`]. A qualified record without a numeric GPA is the
//! only record-level failure and aborts the batch.

pub mod classification;
pub mod coercion;
pub mod normalizer;
pub mod processor;
pub mod ranking;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use normalizer::{AverageMarks, NormalizedRecord, normalize_record, normalize_records};
pub use processor::RecordProcessor;
pub use ranking::{RankingKey, rank_records};
pub use stats::{ProcessingResult, ProcessingStats};
