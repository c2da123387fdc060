//! GPS coordinate value type.

use crate::{OverlayError, OverlayResult};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// Constructed through [`GpsCoordinate::new`], which rejects anything outside
/// `[-90, 90] x [-180, 180]`. Raw geometry that is allowed to leave that domain
/// (corner probes, pixel-center inversions) uses [`GpsCoordinate::unchecked`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GpsCoordinate {
    /// Create a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> OverlayResult<Self> {
        if !Self::in_range(lat, lon) {
            return Err(OverlayError::OutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Create a coordinate without range validation.
    pub fn unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check whether a lat/lon pair lies in the valid geographic domain.
    /// NaN is never in range.
    pub fn in_range(lat: f64, lon: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }

    pub fn is_valid(&self) -> bool {
        Self::in_range(self.lat, self.lon)
    }
}
