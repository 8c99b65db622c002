//! Tests for global and section ranking

use super::*;
use crate::config::ScoringConfig;
use crate::models::Ranking;
use crate::record_processor::ranking::{RankingKey, rank_records};
use crate::record_processor::stats::ProcessingStats;
use std::cmp::Ordering;

fn rank(records: Vec<StudentRecord>) -> (Vec<StudentRecord>, ProcessingStats) {
    let mut stats = ProcessingStats::new();
    let ranked = rank_records(records, &ScoringConfig::default(), &mut stats);
    (ranked, stats)
}

fn ranking_of(records: &[StudentRecord], roll: i64) -> Option<Ranking> {
    by_roll(records, roll).ranking()
}

fn key(gpa_with: f64, gpa_without: f64, percent: f64, total: i64, roll: i64) -> RankingKey {
    RankingKey {
        gpa_with_additional: gpa_with,
        gpa_without_additional: gpa_without,
        avg_number_per_cent: percent,
        total_with_additional: total,
        roll,
    }
}

#[test]
fn test_merit_order_priorities() {
    let base = key(4.5, 4.0, 80.0, 400, 10);

    assert_eq!(key(5.0, 3.0, 10.0, 100, 99).merit_order(&base), Ordering::Less);
    assert_eq!(key(4.5, 4.1, 10.0, 100, 99).merit_order(&base), Ordering::Less);
    assert_eq!(key(4.5, 4.0, 81.0, 100, 99).merit_order(&base), Ordering::Less);
    assert_eq!(key(4.5, 4.0, 80.0, 401, 99).merit_order(&base), Ordering::Less);
    assert_eq!(key(4.5, 4.0, 80.0, 400, 9).merit_order(&base), Ordering::Less);
    assert_eq!(key(4.5, 4.0, 80.0, 400, 11).merit_order(&base), Ordering::Greater);
    assert_eq!(base.merit_order(&base), Ordering::Equal);
}

#[test]
fn test_global_rank_follows_tie_break_chain() {
    let records = vec![
        ranking_candidate("1", "Hum", "5.0", "4.8", "90.0", "450"),
        ranking_candidate("2", "Hum", "5.0", "4.9", "80.0", "440"),
        ranking_candidate("3", "Hum", "5.0", "4.9", "85.0", "430"),
        ranking_candidate("4", "Hum", "5.0", "4.9", "85.0", "435"),
        ranking_candidate("5", "Hum", "5.0", "4.9", "85.0", "435"),
        ranking_candidate("6", "Hum", "4.9", "4.9", "99.0", "500"),
    ];

    let (ranked, stats) = rank(records);

    assert_eq!(stats.ranked, 6);
    let globals: Vec<(i64, usize)> = (1..=6)
        .map(|roll| (roll, ranking_of(&ranked, roll).unwrap().global))
        .collect();
    assert_eq!(
        globals,
        vec![(1, 5), (2, 4), (3, 3), (4, 1), (5, 2), (6, 6)]
    );
}

#[test]
fn test_section_ranks_are_dense_per_band() {
    let records = vec![
        ranking_candidate("10", "Sci", "4.0", "4.0", "80.0", "400"),
        ranking_candidate("20", "Sci", "5.0", "5.0", "95.0", "470"),
        ranking_candidate("30", "Bus", "4.5", "4.5", "90.0", "450"),
        ranking_candidate("160", "Sci", "3.0", "3.0", "60.0", "300"),
        ranking_candidate("170", "Sci", "3.5", "3.5", "70.0", "350"),
    ];

    let (ranked, stats) = rank(records);

    assert_eq!(
        ranking_of(&ranked, 20),
        Some(Ranking { global: 1, section: Some(1) })
    );
    assert_eq!(
        ranking_of(&ranked, 30),
        Some(Ranking { global: 2, section: None })
    );
    assert_eq!(
        ranking_of(&ranked, 10),
        Some(Ranking { global: 3, section: Some(2) })
    );
    assert_eq!(
        ranking_of(&ranked, 170),
        Some(Ranking { global: 4, section: Some(1) })
    );
    assert_eq!(
        ranking_of(&ranked, 160),
        Some(Ranking { global: 5, section: Some(2) })
    );
    assert_eq!(stats.section_ranked, 4);
}

#[test]
fn test_rolls_outside_bands_have_no_section() {
    let records = vec![
        ranking_candidate("950", "Sci", "5.0", "5.0", "95.0", "470"),
        ranking_candidate("0", "Sci", "4.0", "4.0", "80.0", "400"),
        ranking_candidate("900", "Sci", "3.0", "3.0", "60.0", "300"),
    ];

    let (ranked, _) = rank(records);

    assert_eq!(ranking_of(&ranked, 950).unwrap().section, None);
    assert_eq!(ranking_of(&ranked, 0).unwrap().section, None);
    assert_eq!(ranking_of(&ranked, 900).unwrap().section, Some(1));
}

#[test]
fn test_section_count_limits_bands() {
    let records = vec![
        ranking_candidate("800", "Sci", "5.0", "5.0", "95.0", "470"),
        ranking_candidate("700", "Sci", "4.0", "4.0", "80.0", "400"),
    ];
    let scoring = ScoringConfig {
        section_count: 5,
        ..Default::default()
    };
    let mut stats = ProcessingStats::new();

    let ranked = rank_records(records, &scoring, &mut stats);

    assert_eq!(ranking_of(&ranked, 800).unwrap().section, None);
    assert_eq!(ranking_of(&ranked, 700).unwrap().section, Some(1));
}

#[test]
fn test_non_qualified_records_pass_through_sorted_by_roll() {
    let mut absent = ranking_candidate("5", "Sci", "3.0", "3.0", "0.0", "0");
    absent.insert("status", "absent");
    let failed = record(json!({"status": "failed", "roll": "002", "group3": "Sci"}));
    let records = vec![
        ranking_candidate("9", "Sci", "4.0", "4.0", "80.0", "400"),
        absent,
        failed,
        ranking_candidate("1", "Sci", "3.0", "3.0", "60.0", "300"),
    ];

    let (ranked, stats) = rank(records);

    let rolls: Vec<i64> = ranked.iter().map(|r| r.roll_number().unwrap()).collect();
    assert_eq!(rolls, vec![1, 2, 5, 9]);
    assert_eq!(stats.ranked, 2);
    assert!(by_roll(&ranked, 2).ranking().is_none());
    assert!(by_roll(&ranked, 5).ranking().is_none());
    assert!(!by_roll(&ranked, 5).contains_key("Ranking"));
    assert_eq!(ranking_of(&ranked, 9).unwrap().global, 1);
    assert_eq!(ranking_of(&ranked, 1).unwrap().global, 2);
}

#[test]
fn test_candidate_fields_written_back_as_numbers() {
    let mut candidate = ranking_candidate("7", "Sci", "4.5", "4.3", "95.0", "380");
    candidate.remove("gpaWithoutAdditional");

    let (ranked, stats) = rank(vec![candidate]);
    let r = by_roll(&ranked, 7);

    assert_eq!(r.get("gpaWithAdditional"), Some(&json!(4.5)));
    assert_eq!(r.get("gpaWithoutAdditional"), Some(&json!(0.0)));
    assert_eq!(r.get("avgNumberPerCent"), Some(&json!(95.0)));
    assert_eq!(r.get("totalWithAdditional"), Some(&json!(380)));
    assert_eq!(r.get("roll"), Some(&json!(7)));
    assert_eq!(stats.coercion_fallbacks, 1);
}

#[test]
fn test_fractional_total_truncated_before_ranking() {
    let records = vec![
        ranking_candidate("2", "Hum", "4.0", "4.0", "80.0", "380.9"),
        ranking_candidate("1", "Hum", "4.0", "4.0", "80.0", "380.2"),
        ranking_candidate("3", "Hum", "4.0", "4.0", "80.0", "381"),
    ];

    let (ranked, stats) = rank(records);

    // 380.9 and 380.2 both count as 380, so the lower roll wins the tie
    assert_eq!(ranking_of(&ranked, 3).unwrap().global, 1);
    assert_eq!(ranking_of(&ranked, 1).unwrap().global, 2);
    assert_eq!(ranking_of(&ranked, 2).unwrap().global, 3);
    assert_eq!(
        by_roll(&ranked, 2).get("totalWithAdditional"),
        Some(&json!(380))
    );
    assert_eq!(stats.coercion_fallbacks, 0);
}

#[test]
fn test_malformed_roll_defaults_to_zero() {
    let failed = record(json!({"status": "failed", "roll": "ab"}));
    let (ranked, stats) = rank(vec![
        ranking_candidate("3", "Hum", "4.0", "4.0", "80.0", "400"),
        failed,
    ]);

    assert_eq!(ranked[0].get("roll"), Some(&json!(0)));
    assert_eq!(ranked[1].get("roll"), Some(&json!(3)));
    assert_eq!(stats.coercion_fallbacks, 1);
}

#[test]
fn test_global_ranks_form_dense_permutation() {
    let groups = ["Sci", "Bus", "Hum"];
    let records: Vec<StudentRecord> = (1..=60u32)
        .map(|roll| {
            let gpa = 3.0 + f64::from((roll * 7) % 5) * 0.5;
            let percent = f64::from((roll * 13) % 40) + 60.0;
            ranking_candidate(
                &(roll * 14).to_string(),
                groups[(roll % 3) as usize],
                &gpa.to_string(),
                &gpa.to_string(),
                &percent.to_string(),
                &((roll * 11) % 100 + 300).to_string(),
            )
        })
        .collect();

    let (ranked, _) = rank(records);

    assert_eq!(ranked.len(), 60);
    let mut globals: Vec<usize> = ranked
        .iter()
        .map(|r| r.ranking().unwrap().global)
        .collect();
    globals.sort_unstable();
    assert_eq!(globals, (1..=60).collect::<Vec<_>>());

    for section in crate::models::Section::ALL {
        let band = section.band(150);
        let mut section_ranks: Vec<usize> = ranked
            .iter()
            .filter(|r| band.contains(&r.roll_number().unwrap()))
            .filter(|r| r.get("group3") == Some(&json!("Sci")))
            .map(|r| r.ranking().unwrap().section.unwrap())
            .collect();
        section_ranks.sort_unstable();
        let expected: Vec<usize> = (1..=section_ranks.len()).collect();
        assert_eq!(section_ranks, expected);
    }

    for r in ranked.iter().filter(|r| r.get("group3") != Some(&json!("Sci"))) {
        assert_eq!(r.ranking().unwrap().section, None);
    }

    let rolls: Vec<i64> = ranked.iter().map(|r| r.roll_number().unwrap()).collect();
    let mut sorted = rolls.clone();
    sorted.sort_unstable();
    assert_eq!(rolls, sorted);
}

#[test]
fn test_empty_batch() {
    let (ranked, stats) = rank(Vec::new());
    assert!(ranked.is_empty());
    assert_eq!(stats.ranked, 0);
}
