//! Tests for the record processor module
//!
//! This module provides unit and integration tests for all record processing components.

pub mod ranking_tests;

// Test helper functions and fixtures
use crate::models::StudentRecord;
use serde_json::{Value, json};

/// Build a record from a JSON object literal
pub fn record(value: Value) -> StudentRecord {
    serde_json::from_value(value).expect("test record must be a JSON object")
}

/// Build a 12-character class roll: batch segment, group digit and serial
pub fn make_roll(batch: &str, group: char, serial: u32) -> String {
    format!("20240{}0{}{:03}", batch, group, serial)
}

/// Score block for a subject the student did not take
pub fn blank_block() -> Value {
    json!({"cq": "", "mcq": "", "practical": "", "termTotal": "", "grade": "", "gp": ""})
}

/// Complete score block
pub fn score_block(cq: &str, mcq: &str, term_total: &str) -> Value {
    json!({
        "cq": cq,
        "mcq": mcq,
        "practical": "",
        "termTotal": term_total,
        "grade": "A",
        "gp": "4.00"
    })
}

/// Raw qualified student with the given roll, total and GPAs
pub fn qualified_student(
    class_roll: &str,
    total: &str,
    gpa_with: &str,
    gpa_without: &str,
) -> StudentRecord {
    record(json!({
        "status": "qualified",
        "classRoll": class_roll,
        "studentName": format!("Student {}", class_roll),
        "totalWithAdditional": total,
        "gpaWithAdditional": gpa_with,
        "gpaWithoutAdditional": gpa_without,
    }))
}

/// Normalized-looking candidate as the ranking engine receives it
pub fn ranking_candidate(
    roll: &str,
    group: &str,
    gpa_with: &str,
    gpa_without: &str,
    percent: &str,
    total: &str,
) -> StudentRecord {
    record(json!({
        "totalWithAdditional": total,
        "gpaWithAdditional": gpa_with,
        "gpaWithoutAdditional": gpa_without,
        "avgNumberPerCent": percent,
        "group3": group,
        "roll": roll,
        "status": "qualified",
    }))
}

/// Field names of a record in order
pub fn keys(record: &StudentRecord) -> Vec<String> {
    record.as_map().keys().cloned().collect()
}

/// Find the record with the given integer roll
pub fn by_roll(records: &[StudentRecord], roll: i64) -> &StudentRecord {
    records
        .iter()
        .find(|r| r.roll_number() == Some(roll))
        .unwrap_or_else(|| panic!("no record with roll {}", roll))
}
