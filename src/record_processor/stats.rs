//! Processing statistics and result structures for the record pipeline
//!
//! This module provides types for tracking how many records qualified, were
//! corrected, fell back to defaults and were ranked, and for handing the
//! processed records to the output stage.

use crate::models::StudentRecord;

/// Statistics for record processing operations
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStats {
    /// Total number of input records
    pub total_input: usize,
    /// Records whose status was "qualified" on input
    pub qualified: usize,
    /// Qualified records with zero total marks, re-marked absent
    pub corrected_to_absent: usize,
    /// Blank score blocks removed from records
    pub blank_subjects_dropped: usize,
    /// Fields that could not be parsed and fell back to a default
    pub coercion_fallbacks: usize,
    /// Records that received a global rank
    pub ranked: usize,
    /// Records that received a section rank
    pub section_ranked: usize,
    /// Final number of output records
    pub final_output: usize,
    /// Descriptions of coercion fallbacks for debugging
    pub fallback_messages: Vec<String>,
}

impl ProcessingStats {
    /// Create new empty processing statistics
    pub fn new() -> Self {
        Self {
            total_input: 0,
            qualified: 0,
            corrected_to_absent: 0,
            blank_subjects_dropped: 0,
            coercion_fallbacks: 0,
            ranked: 0,
            section_ranked: 0,
            final_output: 0,
            fallback_messages: Vec::new(),
        }
    }

    /// Record a field that fell back to its default value
    pub fn add_fallback(&mut self, message: String) {
        self.coercion_fallbacks += 1;
        self.fallback_messages.push(message);
    }

    /// Percentage of input records that qualified
    pub fn qualification_rate(&self) -> f64 {
        if self.total_input == 0 {
            0.0
        } else {
            (self.qualified as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Percentage of qualified records that ended up ranked
    pub fn ranking_rate(&self) -> f64 {
        if self.qualified == 0 {
            0.0
        } else {
            (self.ranked as f64 / self.qualified as f64) * 100.0
        }
    }

    /// Whether every input record made it to the output
    pub fn is_complete(&self) -> bool {
        self.total_input == self.final_output
    }

    /// Get summary of processing statistics
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} -> {} records | Qualified: {} ({:.1}%) | \
             Marked absent: {} | Ranked: {} ({} in sections) | \
             Blank subjects dropped: {} | Fallbacks: {}",
            self.total_input,
            self.final_output,
            self.qualified,
            self.qualification_rate(),
            self.corrected_to_absent,
            self.ranked,
            self.section_ranked,
            self.blank_subjects_dropped,
            self.coercion_fallbacks
        )
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of record processing operations
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Cleaned and ranked records, sorted by roll
    pub records: Vec<StudentRecord>,
    /// Processing statistics
    pub stats: ProcessingStats,
}

impl ProcessingResult {
    /// Create a new processing result
    pub fn new(records: Vec<StudentRecord>, stats: ProcessingStats) -> Self {
        Self { records, stats }
    }

    /// Get the number of processed records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
