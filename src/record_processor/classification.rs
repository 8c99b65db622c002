//! Roll number classification
//!
//! A class roll encodes the student's batch (characters 5-6), academic group
//! (character 8) and serial number (last three characters). Malformed rolls
//! degrade every derived field to "not classified" rather than failing.

use crate::config::ScoringConfig;
use crate::constants::{BATCH_SEGMENT_LEN, BATCH_SEGMENT_START, GROUP_DIGIT_INDEX, SHORT_ROLL_LEN};
use crate::models::{Group, Section};

/// Academic group from the roll's group digit
pub fn classify_group(class_roll: &str) -> Option<Group> {
    class_roll
        .chars()
        .nth(GROUP_DIGIT_INDEX)
        .and_then(Group::from_digit)
}

/// Last three characters of the roll (the whole roll when shorter)
pub fn short_roll(class_roll: &str) -> String {
    let len = class_roll.chars().count();
    class_roll
        .chars()
        .skip(len.saturating_sub(SHORT_ROLL_LEN))
        .collect()
}

/// Science section from the roll's serial number
///
/// Serial numbers fall into consecutive bands of `section_band_width`; a
/// non-positive serial is placed in the first band.
pub fn derive_section(
    class_roll: &str,
    group: Option<Group>,
    scoring: &ScoringConfig,
) -> Option<Section> {
    if group != Some(Group::Science) {
        return None;
    }

    let serial: i64 = short_roll(class_roll).trim().parse().ok()?;
    let width = scoring.section_band_width;
    let index = if serial > 0 {
        (serial + width - 1) / width
    } else {
        1
    };

    if index as usize > scoring.section_count {
        return None;
    }
    Section::from_index(index)
}

/// Batch number, one past the two-digit segment at characters 5-6
pub fn derive_batch(class_roll: &str) -> Option<String> {
    let segment: String = class_roll
        .chars()
        .skip(BATCH_SEGMENT_START)
        .take(BATCH_SEGMENT_LEN)
        .collect();

    let value: i64 = segment.trim().parse().ok()?;
    value.checked_add(1).map(|batch| batch.to_string())
}
