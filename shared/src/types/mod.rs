//! Core record types used throughout the directory data layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

/// Top-level geographic zone a school belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Gaza,
    WestBank,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Gaza, Region::WestBank];

    /// Display label used for text search and presentation
    pub fn label(&self) -> &'static str {
        match self {
            Region::Gaza => "غزة",
            Region::WestBank => "الضفة الغربية",
        }
    }

    /// Only West Bank schools are grouped into directorates
    pub fn has_directorates(&self) -> bool {
        matches!(self, Region::WestBank)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Gaza => write!(f, "gaza"),
            Region::WestBank => write!(f, "west_bank"),
        }
    }
}

impl FromStr for Region {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "gaza" | "غزة" => Ok(Region::Gaza),
            "west_bank" | "westbank" | "west-bank" | "الضفة" | "الضفة الغربية" => Ok(Region::WestBank),
            _ => Err(SharedError::unknown("region", trimmed)),
        }
    }
}

/// Closed set of institution categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    Kindergarten,
    Basic,
    Secondary,
    Vocational,
    International,
}

impl SchoolType {
    pub const ALL: [SchoolType; 5] = [
        SchoolType::Kindergarten,
        SchoolType::Basic,
        SchoolType::Secondary,
        SchoolType::Vocational,
        SchoolType::International,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SchoolType::Kindergarten => "رياض أطفال",
            SchoolType::Basic => "أساسية",
            SchoolType::Secondary => "ثانوية",
            SchoolType::Vocational => "مهنية",
            SchoolType::International => "دولية",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolType::Kindergarten => write!(f, "kindergarten"),
            SchoolType::Basic => write!(f, "basic"),
            SchoolType::Secondary => write!(f, "secondary"),
            SchoolType::Vocational => write!(f, "vocational"),
            SchoolType::International => write!(f, "international"),
        }
    }
}

impl FromStr for SchoolType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        SchoolType::ALL
            .into_iter()
            .find(|t| t.label() == trimmed || t.to_string() == lowered)
            .ok_or_else(|| SharedError::unknown("school type", trimmed))
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One institution in the directory
///
/// Records are built once by a data provider and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRecord {
    pub id: String,
    pub name: String,
    pub alternate_name: String,
    pub address: String,
    pub city: String,
    pub region: Region,
    pub directorate: Option<String>,
    #[serde(rename = "type")]
    pub school_type: SchoolType,
    pub rating: f64,
    pub votes: u32,
    pub students_count: u32,
    pub established_year: u16,
    pub subjects: Vec<String>,
    pub features: Vec<String>,
    pub coordinates: Coordinates,
}

impl SchoolRecord {
    pub const MAX_RATING: f64 = 5.0;

    /// Check the invariants a provider must uphold before handing the record out
    pub fn validate(&self) -> SharedResult<()> {
        if self.id.trim().is_empty() {
            return Err(SharedError::invalid_record(&self.name, "empty id"));
        }
        if !(0.0..=Self::MAX_RATING).contains(&self.rating) {
            return Err(SharedError::invalid_record(
                &self.id,
                format!("rating {} outside 0.0..=5.0", self.rating),
            ));
        }
        if !self.coordinates.is_finite() {
            return Err(SharedError::invalid_record(&self.id, "non-finite coordinates"));
        }
        if self.directorate.is_some() && !self.region.has_directorates() {
            return Err(SharedError::invalid_record(
                &self.id,
                format!("directorate set for region {}", self.region),
            ));
        }
        Ok(())
    }

    /// Text fields consulted by free-text search, in match priority order
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.name.as_str(),
            self.alternate_name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.region.label(),
        ]
        .into_iter()
        .chain(self.directorate.as_deref())
    }
}

/// One evaluation criterion as shown on a school's detail page
///
/// Kept independent from [`SchoolRecord::rating`]; nothing derives one from the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCriterionScore")]
pub struct CriterionScore {
    label: String,
    percentage: f64,
}

#[derive(Deserialize)]
struct RawCriterionScore {
    label: String,
    percentage: f64,
}

impl TryFrom<RawCriterionScore> for CriterionScore {
    type Error = SharedError;

    fn try_from(raw: RawCriterionScore) -> Result<Self, Self::Error> {
        CriterionScore::new(raw.label, raw.percentage)
    }
}

impl CriterionScore {
    pub fn new(label: impl Into<String>, percentage: f64) -> SharedResult<Self> {
        let label = label.into();
        if !(0.0..=100.0).contains(&percentage) {
            return Err(SharedError::InvalidCriterion { label, percentage });
        }
        Ok(Self { label, percentage })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// Independently loaded region of page data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    SearchResults,
    BestOf,
    MapData,
    Statistics,
    RecentlyAdded,
    RatingForm,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::SearchResults,
        SectionKey::BestOf,
        SectionKey::MapData,
        SectionKey::Statistics,
        SectionKey::RecentlyAdded,
        SectionKey::RatingForm,
    ];
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKey::SearchResults => "search_results",
            SectionKey::BestOf => "best_of",
            SectionKey::MapData => "map_data",
            SectionKey::Statistics => "statistics",
            SectionKey::RecentlyAdded => "recently_added",
            SectionKey::RatingForm => "rating_form",
        };
        f.write_str(name)
    }
}

impl FromStr for SectionKey {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SectionKey::ALL
            .into_iter()
            .find(|key| key.to_string() == normalized)
            .ok_or_else(|| SharedError::unknown("section", s))
    }
}
