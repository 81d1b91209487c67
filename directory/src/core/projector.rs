//! Coordinate to map-panel projection
//!
//! A coarse placement heuristic, not a cartographic projection: each region has
//! its own affine calibration and the result is clamped onto the panel.

use serde::{Deserialize, Serialize};
use shared::{Coordinates, ProjectionProfile, ProjectionSettings, Region, SchoolRecord};

/// Marker position as percentages of the panel's height and width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPosition {
    pub top: f64,
    pub left: f64,
}

/// A projected record, ready for the map section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub position: MarkerPosition,
}

fn to_panel(value: f64, fallback: f64) -> f64 {
    let value = if value.is_nan() { fallback } else { value };
    value.clamp(0.0, 100.0)
}

fn apply_profile(profile: &ProjectionProfile, coord: Coordinates) -> MarkerPosition {
    let top = profile.base_top + (coord.lat - profile.origin_lat) * profile.scale_lat;
    let left = profile.base_left + (coord.lng - profile.origin_lng) * profile.scale_lng;
    MarkerPosition {
        top: to_panel(top, profile.base_top),
        left: to_panel(left, profile.base_left),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Projector {
    settings: ProjectionSettings,
}

impl Projector {
    pub fn new(settings: ProjectionSettings) -> Self {
        Self { settings }
    }

    pub fn project(&self, coord: Coordinates, region: Region) -> MarkerPosition {
        apply_profile(self.settings.profile(region), coord)
    }

    pub fn project_record(&self, record: &SchoolRecord) -> MarkerPosition {
        self.project(record.coordinates, record.region)
    }

    pub fn project_all(&self, records: &[SchoolRecord]) -> Vec<Marker> {
        records
            .iter()
            .map(|record| Marker {
                id: record.id.clone(),
                name: record.name.clone(),
                region: record.region,
                position: self.project_record(record),
            })
            .collect()
    }
}

/// Project with the default calibration
pub fn project(coord: Coordinates, region: Region) -> MarkerPosition {
    Projector::default().project(coord, region)
}
