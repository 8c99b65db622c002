//! Input discovery module for result sheets
//!
//! Resolves which scraped result sheet a run should process. Earlier
//! workflow stages hand their outputs over as tagged entries of the form
//! `<label>_:<path>`, either as command-line arguments or as lines of the
//! shared workflow log.

use crate::constants::INPUT_TAG;
use crate::error::{Result, ResultSheetError};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Everything up to and including the first `_:` is the label
const ENTRY_PATTERN: &str = r"^(?P<label>.*?_):(?P<path>.+)$";

/// One tagged entry handed over between workflow stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEntry {
    /// Label before the separator, e.g. `_resultSheetJson_20250910_175731_`
    pub label: String,
    /// Path after the first separator
    pub path: PathBuf,
}

impl WorkflowEntry {
    /// Whether the label carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.label.contains(tag)
    }

    /// Run timestamp following the tag in the label, if any
    pub fn timestamp(&self, tag: &str) -> Option<&str> {
        let (_, rest) = self.label.split_once(tag)?;
        let stamp = rest.trim_end_matches('_');
        (!stamp.is_empty()).then_some(stamp)
    }
}

/// Input discovery component
#[derive(Debug)]
pub struct InputDiscovery {
    entry_pattern: Regex,
}

impl InputDiscovery {
    /// Create a new input discovery instance
    pub fn new() -> Result<Self> {
        let entry_pattern = Regex::new(ENTRY_PATTERN).map_err(|e| {
            ResultSheetError::configuration(format!("Invalid workflow entry pattern: {}", e))
        })?;
        Ok(Self { entry_pattern })
    }

    /// Parse one `<label>_:<path>` entry
    pub fn parse_entry(&self, text: &str) -> Option<WorkflowEntry> {
        let captures = self.entry_pattern.captures(text.trim())?;
        let path = captures["path"].trim();
        if path.is_empty() {
            return None;
        }
        Some(WorkflowEntry {
            label: captures["label"].to_string(),
            path: PathBuf::from(path),
        })
    }

    /// Last argument tagged as a scraped result sheet
    pub fn input_from_args<S: AsRef<str>>(&self, args: &[S]) -> Option<WorkflowEntry> {
        args.iter()
            .filter_map(|arg| self.parse_entry(arg.as_ref()))
            .filter(|entry| entry.has_tag(INPUT_TAG))
            .last()
    }

    /// Last result sheet entry recorded in the workflow log
    ///
    /// A missing workflow log yields `None`.
    pub async fn input_from_workflow_log(&self, workflow_log: &Path) -> Result<Option<WorkflowEntry>> {
        let content = match fs::read_to_string(workflow_log).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Workflow log not found: {}", workflow_log.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let entry = content
            .lines()
            .filter_map(|line| self.parse_entry(line))
            .filter(|entry| entry.has_tag(INPUT_TAG))
            .last();

        if let Some(entry) = &entry {
            debug!(
                "Workflow log {} points at {}",
                workflow_log.display(),
                entry.path.display()
            );
        }
        Ok(entry)
    }

    /// Resolve the result sheet to process
    ///
    /// An explicit path wins, then the workflow log. Tagged arguments are
    /// folded into the explicit path by the CLI before this is called.
    pub async fn resolve_input(
        &self,
        explicit: Option<&Path>,
        workflow_log: &Path,
    ) -> Result<PathBuf> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => self
                .input_from_workflow_log(workflow_log)
                .await?
                .map(|entry| entry.path)
                .ok_or_else(|| ResultSheetError::NoInputSelected {
                    tag: INPUT_TAG.to_string(),
                })?,
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ResultSheetError::InputNotFound { path });
        }

        debug!("Selected result sheet: {}", path.display());
        Ok(path)
    }
}

/// List the cleaned result sheets present in an output directory, sorted by name
pub fn list_results(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = output_dir.join("*.json");
    let pattern = pattern.to_string_lossy();

    let entries = glob::glob(&pattern).map_err(|e| {
        ResultSheetError::configuration(format!("Invalid results pattern '{}': {}", pattern, e))
    })?;

    let mut results = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => results.push(path),
            Ok(_) => {}
            Err(e) => debug!("Skipping unreadable result entry: {}", e),
        }
    }

    results.sort();
    Ok(results)
}
