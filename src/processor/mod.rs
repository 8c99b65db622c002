//! Main pipeline for result sheet cleaning.
//!
//! Orchestrates one run: select the scraped result sheet, read it, normalize
//! and rank the records, write the cleaned sheet, then append its entry to
//! the workflow log. The workflow entry is only appended after the cleaned
//! sheet has been written.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::InputDiscovery, writer::ResultWriter};

use crate::config::PipelineConfig;
use crate::constants::RUN_TIMESTAMP_FORMAT;
use crate::error::{Result, ResultSheetError};
use crate::models::{RunSummary, StudentRecord};
use crate::record_processor::RecordProcessor;

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info};

/// Pipeline turning a scraped result sheet into a cleaned, ranked one
#[derive(Debug)]
pub struct ResultSheetPipeline {
    config: PipelineConfig,
    discovery: InputDiscovery,
    record_processor: RecordProcessor,
    writer: ResultWriter,
}

impl ResultSheetPipeline {
    /// Create a new pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            discovery: InputDiscovery::new()?,
            record_processor: RecordProcessor::new(config.scoring.clone()),
            writer: ResultWriter::new(config.output_dir.clone(), config.workflow_log.clone()),
            config,
        })
    }

    /// Get the pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Main processing entry point
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let timestamp = self.run_timestamp();
        info!("Starting result sheet cleaning run {}", timestamp);

        // Step 1: Select and read the scraped sheet
        let input_path = self
            .discovery
            .resolve_input(self.config.input_path.as_deref(), &self.config.workflow_log)
            .await?;
        let records = read_records(&input_path).await?;
        let records_read = records.len();
        info!(
            "Read {} records from {}",
            records_read,
            input_path.display()
        );

        // Step 2: Normalize and rank
        let result = self.record_processor.process_records(records)?;
        info!("{}", result.summary());

        // Step 3: Write the cleaned sheet, then record it
        let output_path = self.writer.write_records(&result.records, &timestamp).await?;
        let workflow_entry = self
            .writer
            .append_workflow_entry(&output_path, &timestamp)
            .await?;

        let summary = RunSummary {
            input_path,
            output_path,
            workflow_entry,
            records_read,
            qualified: result.stats.qualified,
            corrected_to_absent: result.stats.corrected_to_absent,
            ranked: result.stats.ranked,
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        info!(
            "Run {} completed in {}ms",
            timestamp, summary.processing_time_ms
        );
        Ok(summary)
    }

    /// List cleaned result sheets in the configured output directory
    pub fn list_results(&self) -> Result<Vec<PathBuf>> {
        discovery::list_results(&self.config.output_dir)
    }

    fn run_timestamp(&self) -> String {
        match &self.config.timestamp {
            Some(timestamp) => timestamp.clone(),
            None => chrono::Local::now()
                .format(RUN_TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// Read a scraped result sheet: a JSON array of record objects
pub async fn read_records(path: &Path) -> Result<Vec<StudentRecord>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ResultSheetError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ResultSheetError::invalid_input(path, format!("Malformed JSON: {}", e)))?;

    let Value::Array(elements) = document else {
        return Err(ResultSheetError::invalid_input(
            path,
            "Expected a JSON array of records",
        ));
    };

    let records = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(map) => Ok(StudentRecord::from_map(map)),
            other => Err(ResultSheetError::invalid_input(
                path,
                format!("Element {} is not an object: {}", index, other),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}
