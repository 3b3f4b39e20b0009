//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur when constructing geographic values.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude or longitude outside its valid range
    #[error("coordinate out of range: {latitude}, {longitude}")]
    OutOfRange {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },
}
