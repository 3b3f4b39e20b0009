//! Geographic value types for the whereabouts coordinator.
//!
//! This crate provides:
//! - The `Coordinate` value type with range validation
//! - Typed errors for rejected coordinates
//!
//! # Example
//!
//! ```
//! use whereabouts_geo::Coordinate;
//!
//! let fix = Coordinate::new(12.9716, 77.5946); // Bengaluru
//! assert!(fix.is_valid());
//! assert_eq!(fix.to_string(), "12.9716, 77.5946");
//! ```

mod error;

pub use error::{GeoError, Result};

use std::fmt;

/// A geographic coordinate with latitude and longitude.
///
/// Produced once per successful acquisition and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without range checking.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a new coordinate, rejecting out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::OutOfRange {
                latitude,
                longitude,
            })
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.latitude.is_finite()
            && self.longitude.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(52.5200, 13.4050);
        assert_eq!(coord.latitude, 52.5200);
        assert_eq!(coord.longitude, 13.4050);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Coordinate::try_new(12.9, 77.6).is_ok());
        let err = Coordinate::try_new(120.0, 0.0).unwrap_err();
        assert!(matches!(err, GeoError::OutOfRange { .. }));
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (52.5200, 13.4050).into();
        assert_eq!(coord.latitude, 52.5200);
    }

    #[test]
    fn test_display() {
        let coord = Coordinate::new(12.9, 77.6);
        assert_eq!(coord.to_string(), "12.9, 77.6");
    }

    #[test]
    fn test_serde_round_trip() {
        let coord = Coordinate::new(12.9716, 77.5946);
        let json = serde_json::to_string(&coord).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(coord, back);
    }

    proptest! {
        #[test]
        fn prop_in_range_coordinates_are_valid(
            lat in -90.0f64..=90.0,
            lng in -180.0f64..=180.0,
        ) {
            prop_assert!(Coordinate::new(lat, lng).is_valid());
            prop_assert!(Coordinate::try_new(lat, lng).is_ok());
        }

        #[test]
        fn prop_out_of_range_latitude_is_rejected(
            lat in 90.0f64..1e6,
            lng in -180.0f64..=180.0,
        ) {
            prop_assume!(lat > 90.0);
            prop_assert!(!Coordinate::new(lat, lng).is_valid());
            prop_assert!(Coordinate::try_new(lat, lng).is_err());
        }
    }
}
