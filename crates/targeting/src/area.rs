//! Target-area geometry: zoom level and ground distance for a radius.

use blast_core::{BlastError, BlastResult, GeoPoint};
use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.34;

/// The map never zooms out past this level.
pub const MIN_ZOOM_LEVEL: f64 = 5.0;

const BASE_ZOOM_LEVEL: f64 = 10.0;

/// `max(10 - log2(radius), 5)`. Total over positive radii, including
/// fractional ones that match no tier.
pub fn zoom_level_for_radius(radius_miles: f64) -> f64 {
    (BASE_ZOOM_LEVEL - radius_miles.log2()).max(MIN_ZOOM_LEVEL)
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Circle the renderer draws: center, radius and the zoom derived from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetArea {
    pub center: GeoPoint,
    pub radius_miles: f64,
    pub zoom_level: f64,
}

impl TargetArea {
    pub fn new(center: GeoPoint, radius_miles: f64) -> BlastResult<Self> {
        if radius_miles.is_nan() || radius_miles <= 0.0 {
            return Err(BlastError::InvalidRadius(radius_miles));
        }
        Ok(Self {
            center,
            radius_miles,
            zoom_level: zoom_level_for_radius(radius_miles),
        })
    }

    /// Same center, new radius and zoom.
    pub fn with_radius(&self, radius_miles: f64) -> BlastResult<Self> {
        Self::new(self.center, radius_miles)
    }

    pub fn radius_meters(&self) -> f64 {
        miles_to_meters(self.radius_miles)
    }
}

/// Moves the center (marker drag or resolved address). Radius and zoom are kept.
pub fn relocate(area: &TargetArea, new_center: GeoPoint) -> TargetArea {
    TargetArea {
        center: new_center,
        ..*area
    }
}
