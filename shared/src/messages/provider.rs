//! Data provider request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{CriterionScore, Region, SchoolRecord, SchoolType, SectionKey};

/// Structured data for one page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub section: SectionKey,
    pub records: Vec<SchoolRecord>,
    /// Per-school criteria keyed by school id
    pub criteria: BTreeMap<String, Vec<CriterionScore>>,
    pub total_count: usize,
    pub fetched_at: DateTime<Utc>,
}

impl PageData {
    pub fn new(section: SectionKey, records: Vec<SchoolRecord>) -> Self {
        let total_count = records.len();
        Self {
            section,
            records,
            criteria: BTreeMap::new(),
            total_count,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_criteria(mut self, criteria: BTreeMap<String, Vec<CriterionScore>>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn criteria_for(&self, school_id: &str) -> &[CriterionScore] {
        self.criteria.get(school_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Categorical filters accepted by server-backed search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub school_type: Option<SchoolType>,
    pub region: Option<Region>,
    pub directorate: Option<String>,
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub top_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub records: Vec<SchoolRecord>,
    pub total_count: usize,
}

/// A visitor's evaluation of one school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub school_id: String,
    /// Whole stars, 1 to 5
    pub stars: u8,
    pub criteria: Vec<CriterionScore>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    pub id: String,
}
