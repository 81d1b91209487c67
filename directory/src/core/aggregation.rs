//! Statistics over school collections
//!
//! Every function here is total: empty input yields zeroed output rather than
//! an error. Per-school criteria are summarised for display only and are
//! never folded into a record's star rating.

use serde::{Deserialize, Serialize};
use shared::{CriterionScore, Region, SchoolRecord, SchoolType};
use std::collections::BTreeMap;

/// Headline numbers for the statistics section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub count: usize,
    /// Mean rating rounded to one decimal; 0 for an empty collection
    pub average_rating: f64,
    pub total_votes: u64,
    /// Only types that occur at least once
    pub count_by_type: BTreeMap<SchoolType, usize>,
}

/// One display row of a school's criteria panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionRow {
    pub label: String,
    pub percentage: f64,
    /// Percentage expressed on the five-star scale, one decimal
    pub stars: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn summarize(records: &[SchoolRecord]) -> AggregateStats {
    let count = records.len();
    let average_rating = if count == 0 {
        0.0
    } else {
        round1(records.iter().map(|r| r.rating).sum::<f64>() / count as f64)
    };
    let total_votes = records.iter().map(|r| u64::from(r.votes)).sum();

    let mut count_by_type = BTreeMap::new();
    for record in records {
        *count_by_type.entry(record.school_type).or_insert(0) += 1;
    }

    AggregateStats {
        count,
        average_rating,
        total_votes,
        count_by_type,
    }
}

pub fn count_by_region(records: &[SchoolRecord]) -> BTreeMap<Region, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.region).or_insert(0) += 1;
    }
    counts
}

pub fn total_students(records: &[SchoolRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.students_count)).sum()
}

/// Counts per one-star band: `[0,1)`, `[1,2)`, ... `[4,5]`
pub fn rating_histogram(records: &[SchoolRecord]) -> [usize; 5] {
    let mut buckets = [0usize; 5];
    for record in records {
        let band = (record.rating.clamp(0.0, SchoolRecord::MAX_RATING).floor() as usize).min(4);
        buckets[band] += 1;
    }
    buckets
}

/// Label of a `rating_histogram` band, e.g. `[2-3)`; the top band is closed
pub fn band_label(band: usize) -> String {
    let close = if band >= 4 { ']' } else { ')' };
    format!("[{}-{}{}", band, band + 1, close)
}

pub fn criteria_breakdown(scores: &[CriterionScore]) -> Vec<CriterionRow> {
    scores
        .iter()
        .map(|score| CriterionRow {
            label: score.label().to_string(),
            percentage: score.percentage(),
            stars: round1(score.percentage() / 20.0),
        })
        .collect()
}
