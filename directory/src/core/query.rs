//! Search, filter and sort pipeline over in-memory school records
//!
//! Pure business logic: the input slice is never reordered or mutated and
//! every call returns a new collection.

use serde::{Deserialize, Serialize};
use shared::{Region, SchoolRecord, SchoolType, SearchFilters, SharedError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::collation::compare_names;

/// Rating floor applied by "top only" mode
pub const TOP_RATED_FLOOR: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rating,
    Votes,
    Name,
}

impl SortKey {
    /// Direction used when the caller does not pick one
    pub fn natural_order(&self) -> SortOrder {
        match self {
            SortKey::Rating | SortKey::Votes => SortOrder::Descending,
            SortKey::Name => SortOrder::Ascending,
        }
    }

    fn compare(&self, a: &SchoolRecord, b: &SchoolRecord) -> Ordering {
        match self {
            SortKey::Rating => a.rating.total_cmp(&b.rating),
            SortKey::Votes => a.votes.cmp(&b.votes),
            SortKey::Name => compare_names(&a.name, &b.name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Votes => write!(f, "votes"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortKey {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "votes" => Ok(SortKey::Votes),
            "name" => Ok(SortKey::Name),
            other => Err(SharedError::unknown("sort key", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(SharedError::unknown("sort order", other)),
        }
    }
}

/// Parse a type filter where "all" (or "الكل", or blank) means no filter
pub fn parse_type_filter(input: &str) -> Result<Option<SchoolType>, SharedError> {
    match input.trim() {
        "" | "الكل" => Ok(None),
        other if other.eq_ignore_ascii_case("all") => Ok(None),
        other => other.parse().map(Some),
    }
}

/// User-chosen search text, filters and ordering
///
/// `type_filter: None` means "all types"; `sort_key: None` keeps input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub search_text: String,
    pub type_filter: Option<SchoolType>,
    pub region_filter: Option<Region>,
    pub directorate_filter: Option<String>,
    pub min_rating: Option<f64>,
    pub top_only: bool,
    pub sort_key: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from the provider-side filter object
    pub fn from_filters(search_text: &str, filters: &SearchFilters) -> Self {
        Self {
            search_text: search_text.to_string(),
            type_filter: filters.school_type,
            region_filter: filters.region,
            directorate_filter: filters.directorate.clone(),
            min_rating: filters.min_rating,
            top_only: filters.top_only,
            ..Self::default()
        }
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_type(mut self, school_type: SchoolType) -> Self {
        self.type_filter = Some(school_type);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region_filter = Some(region);
        self
    }

    pub fn with_directorate(mut self, directorate: impl Into<String>) -> Self {
        self.directorate_filter = Some(directorate.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn top_only(mut self) -> Self {
        self.top_only = true;
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// True when the spec neither filters nor sorts
    pub fn is_passthrough(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.type_filter.is_none()
            && self.region_filter.is_none()
            && self.directorate_filter.is_none()
            && self.min_rating.is_none()
            && !self.top_only
            && self.sort_key.is_none()
    }
}

/// Filter/sort engine
#[derive(Debug, Clone)]
pub struct QueryEngine {
    top_only_floor: f64,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine {
    pub fn new() -> Self {
        Self {
            top_only_floor: TOP_RATED_FLOOR,
        }
    }

    pub fn with_top_only_floor(top_only_floor: f64) -> Self {
        Self { top_only_floor }
    }

    /// Rating floor after folding in "top only" mode; the stricter floor wins
    pub fn effective_min_rating(&self, spec: &QuerySpec) -> Option<f64> {
        let top = spec.top_only.then_some(self.top_only_floor);
        match (spec.min_rating, top) {
            // f64::max would discard a NaN floor
            (Some(min), Some(top)) => Some(if min.is_nan() || min > top { min } else { top }),
            (min, top) => min.or(top),
        }
    }

    /// Whether a single record satisfies every filter of the spec
    pub fn matches(&self, record: &SchoolRecord, spec: &QuerySpec) -> bool {
        let needle = spec.search_text.trim().to_lowercase();
        self.matches_with_needle(record, spec, &needle, self.effective_min_rating(spec))
    }

    fn matches_with_needle(&self, record: &SchoolRecord, spec: &QuerySpec, needle: &str, floor: Option<f64>) -> bool {
        if !needle.is_empty()
            && !record
                .searchable_fields()
                .any(|field| field.to_lowercase().contains(needle))
        {
            return false;
        }
        if spec.type_filter.is_some_and(|t| t != record.school_type) {
            return false;
        }
        if spec.region_filter.is_some_and(|r| r != record.region) {
            return false;
        }
        if let Some(directorate) = &spec.directorate_filter {
            if record.directorate.as_deref() != Some(directorate.as_str()) {
                return false;
            }
        }
        // An unordered comparison (NaN floor or rating) never passes the floor
        floor.is_none_or(|floor| {
            matches!(
                record.rating.partial_cmp(&floor),
                Some(Ordering::Greater | Ordering::Equal)
            )
        })
    }

    /// Borrowing variant of [`QueryEngine::apply`]
    pub fn select<'a>(&self, records: &'a [SchoolRecord], spec: &QuerySpec) -> Vec<&'a SchoolRecord> {
        let needle = spec.search_text.trim().to_lowercase();
        let floor = self.effective_min_rating(spec);

        let mut selected: Vec<&SchoolRecord> = records
            .iter()
            .filter(|record| self.matches_with_needle(record, spec, &needle, floor))
            .collect();

        if let Some(key) = spec.sort_key {
            let order = spec.sort_order.unwrap_or_else(|| key.natural_order());
            // sort_by is stable and the reversed comparator keeps ties equal
            selected.sort_by(|a, b| {
                let ordering = key.compare(a, b);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        selected
    }

    /// Filter and sort records into a new collection
    pub fn apply(&self, records: &[SchoolRecord], spec: &QuerySpec) -> Vec<SchoolRecord> {
        self.select(records, spec).into_iter().cloned().collect()
    }

    /// Highest-rated records, ties kept in input order
    pub fn best_of(&self, records: &[SchoolRecord], limit: usize) -> Vec<SchoolRecord> {
        let spec = QuerySpec::new().sorted_by(SortKey::Rating);
        self.select(records, &spec).into_iter().take(limit).cloned().collect()
    }
}

/// Filter and sort with the default engine
pub fn apply(records: &[SchoolRecord], spec: &QuerySpec) -> Vec<SchoolRecord> {
    QueryEngine::new().apply(records, spec)
}

/// Most recently established schools first
pub fn recently_added(records: &[SchoolRecord], limit: usize) -> Vec<SchoolRecord> {
    let mut newest: Vec<&SchoolRecord> = records.iter().collect();
    newest.sort_by(|a, b| b.established_year.cmp(&a.established_year));
    newest.into_iter().take(limit).cloned().collect()
}

/// Distinct directorates in first-seen order, for filter menus
pub fn directorates(records: &[SchoolRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for directorate in records.iter().filter_map(|r| r.directorate.as_ref()) {
        if !seen.contains(directorate) {
            seen.push(directorate.clone());
        }
    }
    seen
}
