//! The location-acquisition coordinator
//!
//! Sequences permission checks, cached-fix lookup, flight-mode check,
//! settings resolution, and a single live update into one deterministic
//! outcome. Stages run strictly in order; a later stage never starts
//! before the earlier one's suspension resolves. The only loop is the
//! settings-resolution / live-update sub-loop, bounded by the request's
//! retry policy.

use crate::broker::{
    LiveUpdate, LocationProvider, PermissionBroker, SettingsBroker, SettingsResolution,
    REQUIRED_PERMISSIONS,
};
use crate::cancel::CancelToken;
use crate::config::AcquisitionRequest;
use crate::error::{AcquireError, AcquireResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use whereabouts_geo::Coordinate;

/// Coordinates one location acquisition over host-supplied brokers.
///
/// A single coordinator processes one acquisition at a time; a second
/// `acquire` call while one is pending fails with
/// [`AcquireError::AlreadyInFlight`]. Sequential reuse is fine.
///
/// # Example
///
/// ```rust,ignore
/// let coordinator = LocationAcquisitionCoordinator::new(permissions, settings, provider);
/// match coordinator.acquire(&AcquisitionRequest::default()).await {
///     Ok(fix) => println!("{fix}"),
///     Err(e) => eprintln!("no fix: {e}"),
/// }
/// ```
pub struct LocationAcquisitionCoordinator<P, S, L> {
    permissions: P,
    settings: S,
    provider: L,
    cancel: Option<CancelToken>,
    in_flight: AtomicBool,
}

impl<P, S, L> LocationAcquisitionCoordinator<P, S, L>
where
    P: PermissionBroker,
    S: SettingsBroker,
    L: LocationProvider,
{
    /// Create a coordinator over the three host capabilities.
    pub fn new(permissions: P, settings: S, provider: L) -> Self {
        Self {
            permissions,
            settings,
            provider,
            cancel: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Attach a cancel token honored at every suspension point.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether an acquisition is currently pending on this coordinator.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one acquisition to a terminal outcome.
    ///
    /// Suspends until a fix is resolved or the failure is classified.
    /// The request is validated and the single-flight guard taken before
    /// any broker is touched.
    #[instrument(skip(self, request), fields(accuracy = ?request.accuracy))]
    pub async fn acquire(&self, request: &AcquisitionRequest) -> AcquireResult<Coordinate> {
        request.validate()?;

        let _guard =
            InFlightGuard::try_acquire(&self.in_flight).ok_or(AcquireError::AlreadyInFlight)?;

        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(AcquireError::Cancelled);
            }
        }

        let flow = self.run_stages(request);
        tokio::select! {
            outcome = flow => outcome,
            () = cancelled_or_never(self.cancel.as_ref()) => {
                warn!("acquisition cancelled");
                Err(AcquireError::Cancelled)
            }
            limit = deadline(request.overall_timeout) => {
                warn!(timeout_ms = limit.as_millis() as u64, "acquisition deadline elapsed");
                Err(AcquireError::Timeout(limit))
            }
        }
    }

    async fn run_stages(&self, request: &AcquisitionRequest) -> AcquireResult<Coordinate> {
        // Stage 1: permissions
        debug!("requesting location permissions");
        if !self.permissions.request(REQUIRED_PERMISSIONS).await {
            warn!("location permissions not granted");
            return Err(AcquireError::PermissionDenied);
        }

        // Stage 2: cached fix
        if let Some(fix) = self.provider.last_known().await {
            if fix.is_valid() {
                debug!(%fix, "resolved from last-known fix");
                return Ok(fix);
            }
            debug!(%fix, "last-known fix out of range, ignoring");
        }

        // Stage 3: flight mode, checked before any live attempt since
        // GPS acquisition is pointless while radios are off
        if self.settings.is_airplane_mode_on() {
            warn!("airplane mode active");
            return Err(AcquireError::FlightModeActive);
        }

        // Stages 4-5: settings resolution and a single live update,
        // bounded by the retry policy
        for attempt in 0..request.retry.max_attempts {
            if attempt > 0 {
                let delay = request.retry.delay_for_attempt(attempt);
                debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.settings.resolve(request).await {
                SettingsResolution::Satisfied | SettingsResolution::PromptAccepted => {}
                SettingsResolution::PromptDeclined | SettingsResolution::NeedsUserPrompt => {
                    return Err(self.classify_declined_resolution());
                }
            }

            // One cancel per subscription, released on scope exit so the
            // listener is also removed when a cancel or timeout drops
            // this future mid-await.
            let update = {
                let _subscription = SubscriptionGuard {
                    provider: &self.provider,
                };
                self.provider.next_update(request).await
            };

            match update {
                LiveUpdate::Fix(fix) if fix.is_valid() => {
                    debug!(%fix, attempt, "live update produced a fix");
                    return Ok(fix);
                }
                LiveUpdate::Fix(fix) => {
                    debug!(%fix, attempt, "live fix out of range, treating as no fix");
                }
                LiveUpdate::NoFix => {
                    debug!(attempt, "live update resolved without a fix");
                }
                LiveUpdate::Unavailable => {
                    warn!("provider reports location unavailable");
                    return Err(AcquireError::PrecisionUnavailable);
                }
            }
        }

        warn!(
            attempts = request.retry.max_attempts,
            "live-update attempts exhausted without a fix"
        );
        Err(AcquireError::PrecisionUnavailable)
    }

    /// Tie-break for a declined (or unpresentable) settings prompt: raw
    /// GPS availability overrides the decline classification, so a
    /// device that can still theoretically fix is reported as lacking
    /// precision rather than lacking consent.
    fn classify_declined_resolution(&self) -> AcquireError {
        if self.settings.is_gps_provider_enabled() {
            warn!("settings prompt declined but GPS enabled");
            AcquireError::PrecisionUnavailable
        } else {
            warn!("settings optimization declined");
            AcquireError::SettingsOptimizationDenied
        }
    }
}

/// Removes the live-update listener exactly once per subscription,
/// whether `next_update` resolves or the surrounding future is dropped.
struct SubscriptionGuard<'a, L: LocationProvider> {
    provider: &'a L,
}

impl<L: LocationProvider> Drop for SubscriptionGuard<'_, L> {
    fn drop(&mut self) {
        self.provider.cancel_updates();
    }
}

/// RAII single-flight guard; releases on every exit path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

async fn cancelled_or_never(token: Option<&CancelToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn deadline(limit: Option<Duration>) -> Duration {
    match limit {
        Some(limit) => {
            tokio::time::sleep(limit).await;
            limit
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_is_exclusive() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::try_acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::try_acquire(&flag).is_none());

        drop(guard);
        assert!(InFlightGuard::try_acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn test_deadline_resolves_with_limit() {
        let limit = deadline(Some(Duration::from_millis(1))).await;
        assert_eq!(limit, Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_deadline_without_limit_stays_pending() {
        tokio::select! {
            _ = deadline(None) => panic!("deadline resolved without a limit"),
            _ = tokio::time::sleep(Duration::from_millis(10)) => {}
        }
    }
}
