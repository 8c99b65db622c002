//! Output writing module for cleaned result sheets
//!
//! Writes the cleaned records as pretty-printed JSON and records the
//! produced file in the workflow log so later stages can pick it up.

use crate::constants::{output_filename, output_tag_label};
use crate::error::{Result, ResultSheetError};
use crate::models::StudentRecord;

use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Writer for cleaned result sheets and their workflow log entries
#[derive(Debug)]
pub struct ResultWriter {
    output_dir: PathBuf,
    workflow_log: PathBuf,
}

impl ResultWriter {
    /// Create a new result writer
    pub fn new(output_dir: PathBuf, workflow_log: PathBuf) -> Self {
        Self {
            output_dir,
            workflow_log,
        }
    }

    /// Output path for a run timestamp
    pub fn output_path(&self, timestamp: &str) -> PathBuf {
        self.output_dir.join(output_filename(timestamp))
    }

    /// Write the cleaned records, returning the absolute output path
    pub async fn write_records(
        &self,
        records: &[StudentRecord],
        timestamp: &str,
    ) -> Result<PathBuf> {
        let output_path = self.output_path(timestamp);

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| ResultSheetError::WriteFailed {
                path: self.output_dir.clone(),
                reason: format!("Failed to create output directory: {}", e),
            })?;

        let payload =
            serde_json::to_vec_pretty(records).map_err(|e| ResultSheetError::WriteFailed {
                path: output_path.clone(),
                reason: format!("Failed to serialize records: {}", e),
            })?;

        fs::write(&output_path, &payload)
            .await
            .map_err(|e| ResultSheetError::WriteFailed {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;

        let absolute = absolute_path(&output_path)?;
        info!(
            "Wrote {} records ({} bytes) to {}",
            records.len(),
            payload.len(),
            absolute.display()
        );
        Ok(absolute)
    }

    /// Append the workflow log entry for a written sheet, returning the entry
    pub async fn append_workflow_entry(&self, output_path: &Path, timestamp: &str) -> Result<String> {
        let entry = format!("{}{}", output_tag_label(timestamp), output_path.display());
        let log_failed = |reason: String| ResultSheetError::WorkflowLogFailed {
            path: self.workflow_log.clone(),
            reason,
        };

        if let Some(parent) = self.workflow_log.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| log_failed(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.workflow_log)
            .await
            .map_err(|e| log_failed(e.to_string()))?;

        file.write_all(format!("\n{}", entry).as_bytes())
            .await
            .map_err(|e| log_failed(e.to_string()))?;
        file.flush().await.map_err(|e| log_failed(e.to_string()))?;

        debug!("Appended workflow entry to {}", self.workflow_log.display());
        Ok(entry)
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| ResultSheetError::WriteFailed {
        path: path.to_path_buf(),
        reason: format!("Failed to resolve absolute path: {}", e),
    })
}
