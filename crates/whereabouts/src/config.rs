//! Acquisition request configuration
//!
//! Defaults match the request the original fused-location flow built:
//! a single high-accuracy update with a 10 s interval and 2 s fastest
//! interval.

use crate::error::{AcquireError, AcquireResult};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Desired fix accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    /// Network-level accuracy; cheaper, no GPS requirement
    Coarse,
    /// High-accuracy fix, typically GPS-backed
    Fine,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::Fine
    }
}

/// Configuration for a single location acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionRequest {
    /// Desired fix accuracy
    pub accuracy: Accuracy,
    /// Interval between live updates
    #[serde(with = "duration_secs")]
    pub update_interval: Duration,
    /// Fastest interval the caller can consume updates at
    #[serde(with = "duration_secs")]
    pub fastest_interval: Duration,
    /// Number of live updates to request (the coordinator consumes one)
    pub max_updates: u32,
    /// Overall deadline for the whole acquisition, if any
    pub overall_timeout: Option<Duration>,
    /// Bound on the settings-resolution / live-update retry loop
    pub retry: RetryPolicy,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for AcquisitionRequest {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Fine,
            update_interval: Duration::from_secs(10),
            fastest_interval: Duration::from_secs(2),
            max_updates: 1,
            overall_timeout: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl AcquisitionRequest {
    /// Builder-style method to set the desired accuracy
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Builder-style method to set the update interval
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Builder-style method to set the fastest interval
    #[must_use]
    pub fn with_fastest_interval(mut self, interval: Duration) -> Self {
        self.fastest_interval = interval;
        self
    }

    /// Builder-style method to set the update count
    #[must_use]
    pub fn with_max_updates(mut self, max_updates: u32) -> Self {
        self.max_updates = max_updates;
        self
    }

    /// Builder-style method to set the overall acquisition deadline
    #[must_use]
    pub fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = Some(timeout);
        self
    }

    /// Builder-style method to set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the request
    pub fn validate(&self) -> AcquireResult<()> {
        if self.update_interval.is_zero() {
            return Err(AcquireError::invalid_request(
                "update_interval cannot be zero",
            ));
        }

        if self.fastest_interval > self.update_interval {
            return Err(AcquireError::invalid_request(
                "fastest_interval cannot exceed update_interval",
            ));
        }

        if self.max_updates == 0 {
            return Err(AcquireError::invalid_request(
                "max_updates must be at least 1",
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(AcquireError::invalid_request(
                "retry.max_attempts must be at least 1",
            ));
        }

        if let Some(timeout) = self.overall_timeout {
            if timeout.is_zero() {
                return Err(AcquireError::invalid_request(
                    "overall_timeout cannot be zero",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = AcquisitionRequest::default();
        assert_eq!(request.accuracy, Accuracy::Fine);
        assert_eq!(request.update_interval, Duration::from_secs(10));
        assert_eq!(request.fastest_interval, Duration::from_secs(2));
        assert_eq!(request.max_updates, 1);
        assert!(request.overall_timeout.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let request = AcquisitionRequest::default()
            .with_accuracy(Accuracy::Coarse)
            .with_update_interval(Duration::from_secs(30))
            .with_overall_timeout(Duration::from_secs(60));

        assert_eq!(request.accuracy, Accuracy::Coarse);
        assert_eq!(request.update_interval, Duration::from_secs(30));
        assert_eq!(request.overall_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let request = AcquisitionRequest::default().with_update_interval(Duration::ZERO);
        assert!(matches!(
            request.validate(),
            Err(AcquireError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validation_rejects_inverted_intervals() {
        let request = AcquisitionRequest::default()
            .with_update_interval(Duration::from_secs(1))
            .with_fastest_interval(Duration::from_secs(5));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_updates() {
        let request = AcquisitionRequest::default().with_max_updates(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let request = AcquisitionRequest::default()
            .with_accuracy(Accuracy::Coarse)
            .with_update_interval(Duration::from_secs(30));

        let json = serde_json::to_string(&request).unwrap();
        let back: AcquisitionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
