//! Error types for location acquisition

use std::time::Duration;
use thiserror::Error;

/// Result type alias for acquisition operations
pub type AcquireResult<T> = Result<T, AcquireError>;

/// Classified terminal failures of a location acquisition.
///
/// Every failure is a distinct value the host can match on to decide
/// presentation; the coordinator never surfaces a generic error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// The user declined one or more of the requested location permissions
    #[error("location permission not granted")]
    PermissionDenied,

    /// Airplane mode is active; radios are off so no fix is possible
    #[error("device is in flight mode")]
    FlightModeActive,

    /// The device cannot produce a high-accuracy fix even after settings
    /// resolution; retrying with network connectivity may help
    #[error("high-precision fix unavailable - try again, preferably with internet")]
    PrecisionUnavailable,

    /// The user declined the system prompt to enable higher-accuracy providers
    #[error("location optimization prompt declined")]
    SettingsOptimizationDenied,

    /// The overall acquisition deadline elapsed before any terminal outcome
    #[error("acquisition timed out after {0:?}")]
    Timeout(Duration),

    /// The acquisition was cancelled through its cancel token
    #[error("acquisition cancelled")]
    Cancelled,

    /// A second acquisition was started while one was still pending
    #[error("an acquisition is already in flight on this coordinator")]
    AlreadyInFlight,

    /// The acquisition request failed validation
    #[error("invalid acquisition request: {0}")]
    InvalidRequest(String),
}

impl AcquireError {
    /// Create a request-validation error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Check if the user can recover by re-prompting (permission or
    /// optimization denials)
    #[must_use]
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::SettingsOptimizationDenied
        )
    }

    /// Check if the failure is environmental rather than a user decision
    #[must_use]
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::FlightModeActive | Self::PrecisionUnavailable | Self::Timeout(_)
        )
    }

    /// Check if the failure reflects coordinator misuse rather than a
    /// device or user condition
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::AlreadyInFlight | Self::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_predicates() {
        assert!(AcquireError::PermissionDenied.is_user_recoverable());
        assert!(AcquireError::SettingsOptimizationDenied.is_user_recoverable());
        assert!(!AcquireError::FlightModeActive.is_user_recoverable());

        assert!(AcquireError::FlightModeActive.is_environmental());
        assert!(AcquireError::PrecisionUnavailable.is_environmental());
        assert!(AcquireError::Timeout(Duration::from_secs(5)).is_environmental());
        assert!(!AcquireError::Cancelled.is_environmental());

        assert!(AcquireError::AlreadyInFlight.is_usage_error());
        assert!(AcquireError::invalid_request("zero interval").is_usage_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AcquireError::PermissionDenied.to_string(),
            "location permission not granted"
        );
        assert_eq!(
            AcquireError::invalid_request("max_updates must be at least 1").to_string(),
            "invalid acquisition request: max_updates must be at least 1"
        );
    }
}
