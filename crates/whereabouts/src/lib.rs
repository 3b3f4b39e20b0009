//! Deterministic location acquisition over host-supplied brokers
//!
//! This crate sequences permission checks, last-known-location lookup,
//! provider-settings resolution, and a single live-update fallback into
//! one suspend-until-done call with a classified outcome. It contains no
//! platform code: the host environment injects three capabilities
//! (permission broker, settings broker, location provider) and receives
//! either a [`Coordinate`] or a typed [`AcquireError`].
//!
//! # Features
//!
//! - **Classified failures**: every terminal failure is a distinct
//!   variant, never a generic error
//! - **Bounded retry**: the settings-resolution / live-update sub-loop
//!   is capped by an explicit retry policy with backoff
//! - **Cancellation and timeout**: an optional cancel token and per-call
//!   deadline are honored at every suspension point
//! - **Single-flight**: concurrent reuse of one coordinator is rejected,
//!   never silently interleaved
//!
//! # Example
//!
//! ```rust,ignore
//! use whereabouts::{AcquisitionRequest, LocationAcquisitionCoordinator};
//!
//! # async fn run(permissions: impl whereabouts::PermissionBroker,
//! #              settings: impl whereabouts::SettingsBroker,
//! #              provider: impl whereabouts::LocationProvider) {
//! let coordinator = LocationAcquisitionCoordinator::new(permissions, settings, provider);
//!
//! match coordinator.acquire(&AcquisitionRequest::default()).await {
//!     Ok(fix) => println!("located at {fix}"),
//!     Err(e) if e.is_user_recoverable() => println!("ask again: {e}"),
//!     Err(e) => println!("cannot locate: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(async_fn_in_trait)]

pub mod broker;
pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod retry;

pub use broker::{
    LiveUpdate, LocationProvider, Permission, PermissionBroker, SettingsBroker,
    SettingsResolution, REQUIRED_PERMISSIONS,
};
pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use config::{Accuracy, AcquisitionRequest};
pub use coordinator::LocationAcquisitionCoordinator;
pub use error::{AcquireError, AcquireResult};
pub use retry::RetryPolicy;
pub use whereabouts_geo::Coordinate;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::broker::{
        LiveUpdate, LocationProvider, Permission, PermissionBroker, SettingsBroker,
        SettingsResolution,
    };
    pub use crate::cancel::{cancel_pair, CancelHandle, CancelToken};
    pub use crate::config::{Accuracy, AcquisitionRequest};
    pub use crate::coordinator::LocationAcquisitionCoordinator;
    pub use crate::error::{AcquireError, AcquireResult};
    pub use crate::retry::RetryPolicy;
    pub use whereabouts_geo::Coordinate;
}
