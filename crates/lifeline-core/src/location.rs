//! Best-effort location acquisition.
//!
//! The acquirer wraps an external positioning capability behind a
//! trait. Absence of a fix is a soft failure: permission denial,
//! provider errors, and timeouts all collapse to `None`, and dispatch
//! proceeds with the not-available placeholder. Nothing in this
//! module panics or propagates an error to the activation pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// Default timeout for a single high-accuracy fix.
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder used in the emergency message when no fix is available.
pub const LOCATION_NOT_AVAILABLE: &str = "Location not available";

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Google Maps search link for these coordinates.
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

/// Link text for the emergency message: a maps link when a fix is
/// available, the literal placeholder otherwise.
pub fn maps_link_or_placeholder(position: Option<&Coordinates>) -> String {
    match position {
        Some(coords) => coords.maps_link(),
        None => LOCATION_NOT_AVAILABLE.to_string(),
    }
}

/// Positioning permission state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    /// Not yet decided; the user can still be prompted.
    Prompt,
}

/// The external positioning capability.
///
/// Implementations may block up to the timeout passed to
/// `current_position`; the acquirer imposes no additional waiting.
pub trait LocationProvider {
    /// Current permission state without prompting the user.
    fn check_permission(&self) -> PermissionState;

    /// Prompt the user for positioning permission.
    fn request_permission(&self) -> PermissionState;

    /// One high-accuracy fix, bounded by `timeout`.
    fn current_position(&self, timeout: Duration) -> Result<Coordinates, LocationError>;
}

/// Wraps a [`LocationProvider`] with the permission-then-fix protocol.
pub struct LocationAcquirer<'a> {
    provider: &'a dyn LocationProvider,
}

impl<'a> LocationAcquirer<'a> {
    pub fn new(provider: &'a dyn LocationProvider) -> Self {
        Self { provider }
    }

    /// Acquire a single fix, requesting permission at most once.
    ///
    /// Returns `None` on denial, timeout, or provider failure. Never
    /// returns an error: missing location must not block dispatch.
    pub fn acquire(&self, timeout: Duration) -> Option<Coordinates> {
        let mut permission = self.provider.check_permission();
        if permission != PermissionState::Granted {
            permission = self.provider.request_permission();
        }
        if permission != PermissionState::Granted {
            return None;
        }
        self.provider.current_position(timeout).ok()
    }
}

/// A provider with no positioning capability. Every acquisition fails
/// softly; used where no platform provider exists (tests, plain CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocationProvider;

impl LocationProvider for NoLocationProvider {
    fn check_permission(&self) -> PermissionState {
        PermissionState::Denied
    }

    fn request_permission(&self) -> PermissionState {
        PermissionState::Denied
    }

    fn current_position(&self, _timeout: Duration) -> Result<Coordinates, LocationError> {
        Err(LocationError::Provider("no positioning capability".into()))
    }
}

/// A provider pinned to a fixed position. Lets the CLI demonstrate
/// location-carrying dispatch without device GPS.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn check_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn current_position(&self, _timeout: Duration) -> Result<Coordinates, LocationError> {
        Ok(self.position)
    }
}
