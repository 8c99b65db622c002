//! Core data structures and types for result sheet processing.
//!
//! Defines the dynamic student record, score block states, academic
//! groups and sections, the ranking attached to qualifying students, and
//! the run summary reported by the pipeline.

use crate::constants::{fields, score_keys, status};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// One student's result record
///
/// Records are kept as ordered JSON maps: subjects appear and disappear as
/// keys, unknown scraper fields are passed through untouched, and the field
/// order of the input is preserved in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentRecord(Map<String, Value>);

impl StudentRecord {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a field; an existing key keeps its position
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.to_string(), value.into())
    }

    /// Remove a field without disturbing the order of the others
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Move a field to the end of the record
    pub fn move_to_end(&mut self, key: &str) {
        if let Some(value) = self.0.shift_remove(key) {
            self.0.insert(key.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Textual form of a scalar field
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    /// Status as text, `"None"` when missing
    pub fn status_text(&self) -> String {
        match self.0.get(fields::STATUS) {
            None | Some(Value::Null) => status::MISSING.to_string(),
            Some(value) => scalar_text(value).unwrap_or_else(|| value.to_string()),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.status_text() == status::QUALIFIED
    }

    /// Encoded class roll, empty when missing
    pub fn class_roll(&self) -> String {
        self.text(fields::CLASS_ROLL).unwrap_or_default()
    }

    /// Integer roll, once the ranking engine has coerced it
    pub fn roll_number(&self) -> Option<i64> {
        self.0.get(fields::ROLL).and_then(Value::as_i64)
    }

    /// Ranking attached to a qualifying record
    pub fn ranking(&self) -> Option<Ranking> {
        self.0
            .get(fields::RANKING)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Iterate over nested-map fields and their score block state
    pub fn score_blocks(&self) -> impl Iterator<Item = (&String, ScoreBlockState)> {
        self.0
            .iter()
            .filter_map(|(key, value)| ScoreBlockState::classify(value).map(|state| (key, state)))
    }
}

impl From<Map<String, Value>> for StudentRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render a JSON scalar as text; arrays and objects have no textual form
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(status::MISSING.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// State of a per-subject score block present in a record
///
/// A subject that is not in the record at all is simply absent; every
/// nested map present falls into one of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBlockState {
    /// All six keys present and every one an empty string (subject not taken)
    Blank,
    /// All six keys present
    Complete,
    /// Any other nested map
    Partial,
}

impl ScoreBlockState {
    /// Classify a field value, `None` when it is not a nested map
    pub fn classify(value: &Value) -> Option<Self> {
        let block = value.as_object()?;

        if !score_keys::ALL.iter().all(|key| block.contains_key(*key)) {
            return Some(ScoreBlockState::Partial);
        }

        let blank = score_keys::ALL
            .iter()
            .all(|key| block.get(*key).and_then(Value::as_str) == Some(""));

        Some(if blank {
            ScoreBlockState::Blank
        } else {
            ScoreBlockState::Complete
        })
    }

    /// Whether the block counts toward the subject count
    pub fn counts_as_subject(&self) -> bool {
        matches!(self, ScoreBlockState::Complete)
    }
}

/// Academic group encoded in the class roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Science,
    Business,
    Humanities,
}

impl Group {
    /// Group for the roll's group digit
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Group::Science),
            '2' => Some(Group::Business),
            '3' => Some(Group::Humanities),
            _ => None,
        }
    }

    /// Label written to the `group3` field
    pub fn label(&self) -> &'static str {
        match self {
            Group::Science => "Sci",
            Group::Business => "Bus",
            Group::Humanities => "Hum",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sci" => Some(Group::Science),
            "Bus" => Some(Group::Business),
            "Hum" => Some(Group::Humanities),
            _ => None,
        }
    }
}

/// Science section, one per contiguous roll band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::A,
        Section::B,
        Section::C,
        Section::D,
        Section::E,
        Section::F,
    ];

    /// Section for a 1-based band index
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1..=6 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// 1-based band index
    pub fn index(&self) -> i64 {
        *self as i64 + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
            Section::D => "D",
            Section::E => "E",
            Section::F => "F",
        }
    }

    /// Inclusive roll range of this section's band
    pub fn band(&self, band_width: i64) -> RangeInclusive<i64> {
        let start = (self.index() - 1) * band_width + 1;
        start..=start + band_width - 1
    }

    /// Band containing a roll among the first `section_count` sections
    pub fn band_of(roll: i64, band_width: i64, section_count: usize) -> Option<Self> {
        Self::ALL
            .iter()
            .take(section_count)
            .copied()
            .find(|section| section.band(band_width).contains(&roll))
    }
}

/// Ranking attached to a qualifying record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based position among all qualifying students
    pub global: usize,
    /// 1-based position within the student's science section band
    pub section: Option<usize>,
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub workflow_entry: String,
    pub records_read: usize,
    pub qualified: usize,
    pub corrected_to_absent: usize,
    pub ranked: usize,
    pub processing_time_ms: u128,
}
