//! Per-record normalization of scraped result sheets
//!
//! Turns one raw scraped record into a cleaned record: drops subjects the
//! student did not take, marks absent creative-question components, derives
//! the subject count and average marks, classifies the roll number and
//! re-evaluates the status of qualified students with zero marks.

use crate::config::ScoringConfig;
use crate::constants::{CQ_ABSENT_MARKER, fields, score_keys, status};
use crate::error::{ResultSheetError, Result};
use crate::models::{ScoreBlockState, StudentRecord};
use serde_json::Value;
use tracing::{debug, error};

use super::classification::{classify_group, derive_batch, derive_section, short_roll};
use super::coercion::{coerce_f64, digits_only, format_decimal, parse_f64, round_average};
use super::stats::ProcessingStats;

/// A cleaned record and what normalization observed about it
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: StudentRecord,
    /// Status was "qualified" on input
    pub qualifying: bool,
    /// Qualified with zero total marks and re-marked absent
    pub corrected_to_absent: bool,
    /// Blank score blocks removed
    pub dropped_subjects: usize,
    /// `totalWithAdditional` fell back to 0
    pub total_coerced: bool,
}

/// Average marks per subject, by how they were derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageMarks {
    /// Positive total spread over at least one subject
    Computed(f64),
    /// No complete subject blocks
    NoSubjects,
    /// Subjects present but the total is zero or negative
    NonPositiveTotal,
}

impl AverageMarks {
    pub fn derive(total: f64, subject_count: usize) -> Self {
        if subject_count == 0 {
            AverageMarks::NoSubjects
        } else if total > 0.0 {
            AverageMarks::Computed(round_average(total / subject_count as f64))
        } else {
            AverageMarks::NonPositiveTotal
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            AverageMarks::Computed(avg) => *avg,
            AverageMarks::NoSubjects | AverageMarks::NonPositiveTotal => 0.0,
        }
    }

    /// Text stored on a qualifying record, `None` when nothing is stored
    pub fn stored_text(&self) -> Option<String> {
        match self {
            AverageMarks::Computed(avg) => Some(format_decimal(*avg)),
            AverageMarks::NonPositiveTotal => Some("0".to_string()),
            AverageMarks::NoSubjects => None,
        }
    }

    /// Average expressed as a percentage of one subject's full marks
    pub fn percent(&self, per_subject_full_marks: f64) -> f64 {
        round_average(self.value() * 100.0 / per_subject_full_marks)
    }
}

/// Normalize one raw record
///
/// `index` is the record's position in the batch and only used for error
/// context. A qualified record without a numeric `gpaWithAdditional` is an
/// error; every other malformed field degrades to a default.
pub fn normalize_record(
    index: usize,
    raw: StudentRecord,
    scoring: &ScoringConfig,
) -> Result<NormalizedRecord> {
    let mut record = raw;
    let status_text = record.status_text();
    let qualifying = status_text == status::QUALIFIED;

    if let Some(year) = record.get(fields::ACADEMIC_YEAR) {
        let digits = match year {
            Value::String(s) => digits_only(s),
            Value::Number(n) => digits_only(&n.to_string()),
            _ => String::new(),
        };
        record.insert(fields::ACADEMIC_YEAR, digits);
    }

    let before = record.len();
    record
        .as_map_mut()
        .retain(|_, value| ScoreBlockState::classify(value) != Some(ScoreBlockState::Blank));
    let dropped_subjects = before - record.len();

    for value in record.as_map_mut().values_mut() {
        if let Some(cq) = value
            .as_object_mut()
            .and_then(|block| block.get_mut(score_keys::CQ))
        {
            let absent = match cq {
                Value::String(s) => s.trim().is_empty() || s == CQ_ABSENT_MARKER,
                Value::Null => true,
                _ => false,
            };
            if absent {
                *cq = Value::from(CQ_ABSENT_MARKER);
            }
        }
    }

    let subject_count = record
        .score_blocks()
        .filter(|(_, state)| state.counts_as_subject())
        .count();
    if qualifying {
        record.insert(fields::SUBJECT_COUNT, subject_count);
    }

    let total = coerce_f64(record.get(fields::TOTAL_WITH_ADDITIONAL));
    if total.coerced && qualifying {
        debug!(
            "Record {}: totalWithAdditional {:?} is not numeric, using 0",
            index,
            record.get(fields::TOTAL_WITH_ADDITIONAL)
        );
    }

    let average = AverageMarks::derive(total.value, subject_count);
    let average_percent = average.percent(scoring.per_subject_full_marks);
    if qualifying {
        if let Some(text) = average.stored_text() {
            record.insert(fields::AVG_NUMBER, text);
        }
        record.insert(fields::AVG_NUMBER_PER_CENT, format_decimal(average_percent));
    }

    let class_roll = record.class_roll();
    let group = classify_group(&class_roll);
    let section = derive_section(&class_roll, group, scoring);
    record.insert(fields::GROUP, group.map(|g| g.label()).unwrap_or_default());
    record.insert(fields::SECTION, section.map(|s| s.label()).unwrap_or_default());
    record.insert(fields::BATCH, derive_batch(&class_roll).unwrap_or_default());
    record.insert(fields::ROLL, short_roll(&class_roll));

    let name = record.get(fields::STUDENT_NAME).cloned().unwrap_or(Value::Null);
    record.insert(fields::NAME, name);

    let corrected_to_absent = qualifying && total.value == 0.0;
    if corrected_to_absent {
        debug!(
            "Record {} (classRoll '{}'): qualified with zero total, marking absent",
            index, class_roll
        );
        record.insert(fields::STATUS, status::ABSENT);
    }
    record.move_to_end(fields::STATUS);

    if qualifying {
        let gpa = record
            .get(fields::GPA_WITH_ADDITIONAL)
            .and_then(parse_f64)
            .ok_or_else(|| {
                let value = record
                    .get(fields::GPA_WITH_ADDITIONAL)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "missing".to_string());
                error!(
                    "Record {} (classRoll '{}'): invalid gpaWithAdditional {}",
                    index, class_roll, value
                );
                ResultSheetError::InvalidGpa {
                    index,
                    class_roll: class_roll.clone(),
                    value,
                }
            })?;

        record.insert(fields::GPA, gpa);
        record.insert(fields::TOTAL_MARK, total.value);
        record.insert(fields::AVG_MARK_PERCENT, average_percent);
    }

    Ok(NormalizedRecord {
        record,
        qualifying,
        corrected_to_absent,
        dropped_subjects,
        total_coerced: total.coerced,
    })
}

/// Normalize a batch of raw records, preserving their order
///
/// Stops at the first record that cannot be normalized.
pub fn normalize_records(
    records: Vec<StudentRecord>,
    scoring: &ScoringConfig,
    stats: &mut ProcessingStats,
) -> Result<Vec<StudentRecord>> {
    let mut normalized = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let outcome = normalize_record(index, raw, scoring)?;

        if outcome.qualifying {
            stats.qualified += 1;
            if outcome.total_coerced {
                stats.add_fallback(format!(
                    "record {}: totalWithAdditional defaulted to 0",
                    index
                ));
            }
        }
        if outcome.corrected_to_absent {
            stats.corrected_to_absent += 1;
        }
        stats.blank_subjects_dropped += outcome.dropped_subjects;

        normalized.push(outcome.record);
    }

    debug!(
        "Normalized {} records: {} qualified, {} marked absent, {} blank subjects dropped",
        normalized.len(),
        stats.qualified,
        stats.corrected_to_absent,
        stats.blank_subjects_dropped
    );

    Ok(normalized)
}
