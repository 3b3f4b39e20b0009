//! Host capability traits
//!
//! The coordinator never talks to an OS or vendor SDK directly. The host
//! environment supplies three capabilities: a permission broker, a
//! settings-resolution broker, and a location provider. Each trait method
//! that suspends must resolve exactly once per invocation; the host
//! adapter is responsible for collapsing its platform's success/failure
//! callbacks into that single resolution.

use crate::config::AcquisitionRequest;
use whereabouts_geo::Coordinate;

/// A runtime permission the coordinator may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Precise (GPS-level) location access
    FineLocation,
    /// Approximate (network-level) location access
    CoarseLocation,
}

/// The permission set requested for every acquisition.
pub const REQUIRED_PERMISSIONS: &[Permission] =
    &[Permission::FineLocation, Permission::CoarseLocation];

/// Outcome of a settings-resolution round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsResolution {
    /// Device settings already satisfy the request; no prompt needed
    Satisfied,
    /// A prompt is required but the broker could not present it
    NeedsUserPrompt,
    /// The user accepted the system prompt; settings now satisfy the request
    PromptAccepted,
    /// The user declined or dismissed the system prompt
    PromptDeclined,
}

/// Resolution of a single live-update subscription.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveUpdate {
    /// The provider produced a fix
    Fix(Coordinate),
    /// The provider responded but without a usable fix
    NoFix,
    /// The provider reported that location is not available at all
    Unavailable,
}

/// Asynchronous permission-request facility.
pub trait PermissionBroker {
    /// Request the given permissions, suspending until the user responds.
    /// Returns true iff every requested permission was granted.
    async fn request(&self, permissions: &[Permission]) -> bool;
}

/// Settings-resolution facility plus synchronous device-state reads.
pub trait SettingsBroker {
    /// Check whether device location settings satisfy the request,
    /// prompting the user to fix them when they do not. Suspends through
    /// the prompt round-trip when one is shown.
    async fn resolve(&self, request: &AcquisitionRequest) -> SettingsResolution;

    /// Whether the raw GPS provider is enabled, independent of any
    /// optimization prompt.
    fn is_gps_provider_enabled(&self) -> bool;

    /// Whether airplane mode is active.
    fn is_airplane_mode_on(&self) -> bool;
}

/// Fused-location query facility.
pub trait LocationProvider {
    /// Query the cached last-known fix. Must resolve with a fix or
    /// `None`; never blocks indefinitely.
    async fn last_known(&self) -> Option<Coordinate>;

    /// Subscribe for a single live update and suspend until it resolves.
    /// Registers exactly one single-shot listener per call.
    async fn next_update(&self, request: &AcquisitionRequest) -> LiveUpdate;

    /// Remove the live-update listener. Called by the coordinator exactly
    /// once per resolved `next_update`.
    fn cancel_updates(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_permission_set() {
        assert_eq!(REQUIRED_PERMISSIONS.len(), 2);
        assert!(REQUIRED_PERMISSIONS.contains(&Permission::FineLocation));
        assert!(REQUIRED_PERMISSIONS.contains(&Permission::CoarseLocation));
    }

    #[test]
    fn test_live_update_fix_carries_coordinate() {
        let update = LiveUpdate::Fix(Coordinate::new(12.9, 77.6));
        match update {
            LiveUpdate::Fix(c) => assert_eq!(c.latitude, 12.9),
            _ => panic!("expected a fix"),
        }
    }
}
