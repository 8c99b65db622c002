//! Main record processor implementation and pipeline orchestration
//!
//! This module contains the RecordProcessor struct, which runs normalization
//! over every record and then ranks the normalized batch.

use crate::Result;
use crate::config::ScoringConfig;
use crate::models::StudentRecord;
use tracing::{debug, info};

use super::{
    normalizer::normalize_records,
    ranking::rank_records,
    stats::{ProcessingResult, ProcessingStats},
};

/// Record processor for scraped result sheets
///
/// # Example
///
/// ```rust
/// use result_sheet_processor::config::ScoringConfig;
/// use result_sheet_processor::record_processor::RecordProcessor;
///
/// # fn example(records: Vec<result_sheet_processor::models::StudentRecord>) -> result_sheet_processor::Result<()> {
/// let processor = RecordProcessor::new(ScoringConfig::default());
/// let result = processor.process_records(records)?;
/// println!("{}", result.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordProcessor {
    /// Scoring parameters for averages and section bands
    scoring: ScoringConfig,
}

impl RecordProcessor {
    /// Create a new record processor
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Normalize and rank a batch of records
    ///
    /// Fails only when a qualified record has no usable GPA; the error names
    /// the record and no partial result is returned.
    pub fn process_records(&self, records: Vec<StudentRecord>) -> Result<ProcessingResult> {
        let mut stats = ProcessingStats::new();
        stats.total_input = records.len();

        info!("Processing {} result records", stats.total_input);

        let normalized = normalize_records(records, &self.scoring, &mut stats)?;
        let ranked = rank_records(normalized, &self.scoring, &mut stats);

        stats.final_output = ranked.len();

        for message in &stats.fallback_messages {
            debug!("Fallback: {}", message);
        }
        info!("{}", stats.summary());

        Ok(ProcessingResult::new(ranked, stats))
    }
}
