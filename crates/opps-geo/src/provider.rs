//! Session-scoped user location behind an explicit permission state machine.
//!
//! ```text
//! prompt ──► granted       (terminal for the session)
//!    │
//!    ├────► denied         (until an explicit re-request)
//!    └────► unsupported    (until an explicit re-request)
//! ```
//!
//! Concurrent [`GeolocationProvider::request_location`] calls share one
//! in-flight platform request. Every platform call is bounded by the
//! configured timeout; a stalled request settles to `denied`.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};

use opps_core::{AppConfig, CoordinateTable, Coordinates, Listing};

use crate::error::GeoError;
use crate::locations::{
    filter_within_radius, normalize_radius, remote_only, sort_location_labels, LocationOption,
};
use crate::permission::{PermissionState, PlatformPermission};
use crate::platform::LocationPlatform;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type PendingRequest = Shared<BoxFuture<'static, Result<Coordinates, GeoError>>>;
type PendingSlot = Option<WeakShared<BoxFuture<'static, Result<Coordinates, GeoError>>>>;

#[derive(Debug, Clone, Copy)]
pub struct ProviderOptions {
    /// Upper bound on a single platform position request.
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.geo_timeout_secs),
        }
    }
}

/// Resolves and caches the user's position for the session.
///
/// Cloning is cheap; clones share state.
pub struct GeolocationProvider<P> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for GeolocationProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<P> {
    platform: P,
    table: Arc<CoordinateTable>,
    timeout: Duration,
    state: Mutex<PermissionState>,
    coordinates: OnceLock<Coordinates>,
    /// Weak so an abandoned request, which owns an `Arc<Inner>`, does not
    /// keep the provider alive.
    pending: Mutex<PendingSlot>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<P: LocationPlatform> GeolocationProvider<P> {
    pub fn new(platform: P, table: Arc<CoordinateTable>, options: ProviderOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                platform,
                table,
                timeout: options.timeout,
                state: Mutex::new(PermissionState::Prompt),
                coordinates: OnceLock::new(),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Startup check that never prompts.
    ///
    /// If the platform reports an earlier grant, the position is resolved
    /// silently. A platform without a permission query settles to
    /// `unsupported`. Only moves the state out of `prompt`.
    pub async fn initialize(&self) -> PermissionState {
        let current = self.permission_status();
        if current != PermissionState::Prompt {
            return current;
        }

        if !self.inner.platform.is_supported() {
            return self.inner.leave_prompt(PermissionState::Unsupported);
        }

        match self.inner.platform.query_permission().await {
            None => self.inner.leave_prompt(PermissionState::Unsupported),
            Some(PlatformPermission::Denied) => self.inner.leave_prompt(PermissionState::Denied),
            Some(PlatformPermission::Prompt) => self.permission_status(),
            Some(PlatformPermission::Granted) => {
                tracing::debug!("location previously granted; resolving without prompt");
                if let Err(error) = self.pending_request().await {
                    tracing::debug!(%error, "silent location resolution failed");
                }
                self.permission_status()
            }
        }
    }

    /// User-triggered location request.
    ///
    /// Returns the cached position once granted. Otherwise asks the platform,
    /// joining any request already in flight.
    ///
    /// # Errors
    ///
    /// Returns the [`GeoError`] the request settled with; the provider is then
    /// `denied` or `unsupported` and callers should fall back to non-geo
    /// ordering.
    pub async fn request_location(&self) -> Result<Coordinates, GeoError> {
        if let Some(coords) = self.user_coordinates() {
            return Ok(coords);
        }

        if !self.inner.platform.is_supported() {
            self.inner.settle(PermissionState::Unsupported);
            return Err(GeoError::Unsupported);
        }

        self.pending_request().await
    }

    #[must_use]
    pub fn permission_status(&self) -> PermissionState {
        *lock(&self.inner.state)
    }

    /// The cached position, if a request has succeeded this session.
    #[must_use]
    pub fn user_coordinates(&self) -> Option<Coordinates> {
        self.inner.coordinates.get().copied()
    }

    #[must_use]
    pub fn coordinate_table(&self) -> &CoordinateTable {
        &self.inner.table
    }

    /// Location dropdown ordering; proximity-based once the position is known.
    #[must_use]
    pub fn sorted_locations<S: AsRef<str>>(&self, labels: &[S]) -> Vec<LocationOption> {
        sort_location_labels(labels, self.user_coordinates(), &self.inner.table)
    }

    /// Listings within `radius_miles` of the user.
    ///
    /// Without a known position only remote listings are returned.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidRadius`] for a non-finite radius.
    pub fn filter_by_radius<'a>(
        &self,
        listings: &'a [Listing],
        radius_miles: f64,
    ) -> Result<Vec<&'a Listing>, GeoError> {
        let radius = normalize_radius(radius_miles)?;
        match self.user_coordinates() {
            Some(user) => Ok(filter_within_radius(listings, user, radius, &self.inner.table)),
            None => {
                tracing::debug!(
                    state = %self.permission_status(),
                    "no user position; radius filter falls back to remote listings"
                );
                Ok(remote_only(listings))
            }
        }
    }

    fn pending_request(&self) -> PendingRequest {
        let mut slot = lock(&self.inner.pending);
        if let Some(pending) = slot.as_ref().and_then(WeakShared::upgrade) {
            tracing::debug!("joining in-flight location request");
            return pending;
        }

        let inner = Arc::clone(&self.inner);
        let request = async move { inner.resolve().await }.boxed().shared();
        *slot = request.downgrade();
        request
    }
}

impl<P: LocationPlatform> Inner<P> {
    async fn resolve(&self) -> Result<Coordinates, GeoError> {
        let outcome =
            match tokio::time::timeout(self.timeout, self.platform.current_position()).await {
                Ok(Ok(coords)) if coords.is_valid() => Ok(coords),
                Ok(Ok(coords)) => Err(GeoError::Unavailable(format!(
                    "platform returned out-of-range position ({}, {})",
                    coords.lat, coords.lon
                ))),
                Ok(Err(error)) => Err(error),
                Err(_) => {
                    tracing::warn!(
                        timeout = ?self.timeout,
                        "location request timed out; treating as denied"
                    );
                    Err(GeoError::ResolutionTimeout {
                        after: self.timeout,
                    })
                }
            };

        let result = self.record(outcome);
        lock(&self.pending).take();
        result
    }

    /// Apply a finished request. The first successful position wins and
    /// `granted` is never demoted.
    fn record(&self, outcome: Result<Coordinates, GeoError>) -> Result<Coordinates, GeoError> {
        match outcome {
            Ok(coords) => {
                let cached = *self.coordinates.get_or_init(|| coords);
                self.settle(PermissionState::Granted);
                Ok(cached)
            }
            Err(error) => {
                if let Some(cached) = self.coordinates.get() {
                    return Ok(*cached);
                }
                let next = match error {
                    GeoError::Unsupported => PermissionState::Unsupported,
                    _ => PermissionState::Denied,
                };
                tracing::debug!(%error, state = %next, "location request settled without a position");
                self.settle(next);
                Err(error)
            }
        }
    }

    /// Move to `next` unless already granted.
    fn settle(&self, next: PermissionState) -> PermissionState {
        let mut state = lock(&self.state);
        let from = *state;
        if from != PermissionState::Granted && from != next {
            tracing::debug!(%from, to = %next, "permission state changed");
            *state = next;
        }
        *state
    }

    /// Move to `next` only from `prompt`.
    fn leave_prompt(&self, next: PermissionState) -> PermissionState {
        let mut state = lock(&self.state);
        if *state == PermissionState::Prompt {
            tracing::debug!(to = %next, "permission state initialized");
            *state = next;
        }
        *state
    }
}
