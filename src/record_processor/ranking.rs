//! Global and section ranking of qualified students
//!
//! Ranking is a batch barrier: every qualified record has to be normalized
//! before any rank can be assigned. Candidates are ordered by merit, given a
//! dense global rank, then ranked again inside their science section band.
//! Finally the whole batch, ranked or not, is ordered by roll.

use crate::config::ScoringConfig;
use crate::constants::fields;
use crate::models::{Group, Ranking, Section, StudentRecord};
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::coercion::{coerce_f64, coerce_i64};
use super::stats::ProcessingStats;

/// Merit key of a ranking candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingKey {
    pub gpa_with_additional: f64,
    pub gpa_without_additional: f64,
    pub avg_number_per_cent: f64,
    pub total_with_additional: i64,
    pub roll: i64,
}

impl RankingKey {
    /// Order by merit, best first
    ///
    /// Higher GPA with additional subject, higher GPA without it, higher
    /// average percentage and higher total come first; the lower roll wins
    /// any remaining tie.
    pub fn merit_order(&self, other: &Self) -> Ordering {
        descending(self.gpa_with_additional, other.gpa_with_additional)
            .then_with(|| descending(self.gpa_without_additional, other.gpa_without_additional))
            .then_with(|| descending(self.avg_number_per_cent, other.avg_number_per_cent))
            .then_with(|| other.total_with_additional.cmp(&self.total_with_additional))
            .then_with(|| self.roll.cmp(&other.roll))
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    key: RankingKey,
    /// Section band of a science student, if the roll falls in one
    section: Option<Section>,
}

/// Coerce every record's roll to an integer and write it back
fn coerce_rolls(records: &mut [StudentRecord], stats: &mut ProcessingStats) {
    for (index, record) in records.iter_mut().enumerate() {
        let roll = coerce_i64(record.get(fields::ROLL));
        if roll.coerced {
            stats.add_fallback(format!("record {}: roll defaulted to 0", index));
        }
        record.insert(fields::ROLL, roll.value);
    }
}

/// Coerce a candidate's ranking fields, write them back and build its key
fn candidate_key(index: usize, record: &mut StudentRecord, stats: &mut ProcessingStats) -> RankingKey {
    let mut float_field = |record: &mut StudentRecord, field: &str| {
        let coerced = coerce_f64(record.get(field));
        if coerced.coerced {
            stats.add_fallback(format!("record {}: {} defaulted to 0", index, field));
        }
        record.insert(field, coerced.value);
        coerced.value
    };

    let gpa_with_additional = float_field(record, fields::GPA_WITH_ADDITIONAL);
    let gpa_without_additional = float_field(record, fields::GPA_WITHOUT_ADDITIONAL);
    let avg_number_per_cent = float_field(record, fields::AVG_NUMBER_PER_CENT);

    let total = coerce_i64(record.get(fields::TOTAL_WITH_ADDITIONAL));
    if total.coerced {
        stats.add_fallback(format!(
            "record {}: {} defaulted to 0",
            index,
            fields::TOTAL_WITH_ADDITIONAL
        ));
    }
    record.insert(fields::TOTAL_WITH_ADDITIONAL, total.value);

    RankingKey {
        gpa_with_additional,
        gpa_without_additional,
        avg_number_per_cent,
        total_with_additional: total.value,
        roll: record.roll_number().unwrap_or(0),
    }
}

/// Rank qualified records and order the batch by roll
///
/// Every qualified record receives a `Ranking` with its global rank and, for
/// science students whose roll falls in a section band, its rank within that
/// band. Records that are not qualified pass through unranked. The returned
/// batch has the same length as the input.
pub fn rank_records(
    mut records: Vec<StudentRecord>,
    scoring: &ScoringConfig,
    stats: &mut ProcessingStats,
) -> Vec<StudentRecord> {
    coerce_rolls(&mut records, stats);

    let mut candidates = Vec::new();
    let mut seen_rolls = HashSet::new();
    for (index, record) in records.iter_mut().enumerate() {
        if !record.is_qualified() {
            continue;
        }

        let key = candidate_key(index, record, stats);
        if !seen_rolls.insert(key.roll) {
            warn!("Duplicate roll {} among qualified records", key.roll);
        }
        let science = record
            .get(fields::GROUP)
            .and_then(Value::as_str)
            .and_then(Group::from_label)
            == Some(Group::Science);
        let section = if science {
            Section::band_of(key.roll, scoring.section_band_width, scoring.section_count)
        } else {
            None
        };

        candidates.push(Candidate {
            index,
            key,
            section,
        });
    }

    candidates.sort_by(|a, b| a.key.merit_order(&b.key));

    let mut section_ranks = vec![None; records.len()];
    for section in Section::ALL.iter().take(scoring.section_count) {
        let members = candidates.iter().filter(|c| c.section == Some(*section));

        let mut ranked_in_band = 0;
        for (position, candidate) in members.enumerate() {
            section_ranks[candidate.index] = Some(position + 1);
            ranked_in_band += 1;
        }
        debug!(
            "Section {} (rolls {:?}): {} students ranked",
            section.label(),
            section.band(scoring.section_band_width),
            ranked_in_band
        );
    }

    for (position, candidate) in candidates.iter().enumerate() {
        let ranking = Ranking {
            global: position + 1,
            section: section_ranks[candidate.index],
        };
        if ranking.section.is_some() {
            stats.section_ranked += 1;
        }
        records[candidate.index].insert(
            fields::RANKING,
            json!({ "global": ranking.global, "section": ranking.section }),
        );
    }
    stats.ranked += candidates.len();

    records.sort_by_key(|record| record.roll_number().unwrap_or(0));

    info!(
        "Ranked {} qualified students ({} in science sections)",
        candidates.len(),
        stats.section_ranked
    );

    records
}
