//! Integration tests for the processor module
//!
//! Tests the complete pipeline against result sheets and workflow logs
//! laid out in temporary directories.


use crate::config::PipelineConfig;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEST_TIMESTAMP: &str = "20250910_175731";

/// A small scraped sheet: two science students, one business student,
/// one zero-total "qualified" student and one failed student
pub fn sample_sheet() -> Value {
    json!([
        {
            "status": "qualified",
            "academicYear": "2023-2024",
            "classRoll": "202402301012",
            "studentName": "Rahim",
            "totalWithAdditional": "95",
            "gpaWithAdditional": "5.00",
            "gpaWithoutAdditional": "5.00",
            "Physics": {"cq": "40", "mcq": "25", "practical": "", "termTotal": "65", "grade": "A+", "gp": "5.00"},
            "Biology": {"cq": "", "mcq": "", "practical": "", "termTotal": "", "grade": "", "gp": ""}
        },
        {
            "status": "qualified",
            "academicYear": "2023-2024",
            "classRoll": "202402302420",
            "studentName": "Karim",
            "totalWithAdditional": "70",
            "gpaWithAdditional": "4.20",
            "gpaWithoutAdditional": "4.00"
        },
        {
            "status": "failed",
            "academicYear": "2023-2024",
            "classRoll": "202402303008",
            "studentName": "Jamal"
        },
        {
            "status": "qualified",
            "academicYear": "2023-2024",
            "classRoll": "202402301160",
            "studentName": "Nasrin",
            "totalWithAdditional": "0",
            "gpaWithAdditional": "3.00",
            "gpaWithoutAdditional": "3.00"
        },
        {
            "status": "qualified",
            "academicYear": "2023-2024",
            "classRoll": "202402301003",
            "studentName": "Sadia",
            "totalWithAdditional": "80",
            "gpaWithAdditional": "5.00",
            "gpaWithoutAdditional": "4.80",
            "Physics": {"cq": "", "mcq": "20", "practical": "", "termTotal": "20", "grade": "F", "gp": "0.00"}
        }
    ])
}

/// Write a JSON document into the temporary directory
pub fn write_sheet(temp_dir: &TempDir, name: &str, document: &Value) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

/// Pipeline configuration rooted in the temporary directory
pub fn test_config(temp_dir: &TempDir) -> PipelineConfig {
    PipelineConfig::default()
        .with_output_dir(temp_dir.path().join("cleaned"))
        .with_workflow_log(temp_dir.path().join("logs").join("workflow.txt"))
        .with_log_file(None)
        .with_timestamp(TEST_TIMESTAMP)
}

/// Read a cleaned sheet back as a JSON array
pub fn read_output(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap();
    match serde_json::from_str(&content).unwrap() {
        Value::Array(records) => records,
        other => panic!("Expected an array, got {}", other),
    }
}
