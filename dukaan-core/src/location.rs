//! Platform location provider abstraction
//!
//! The engine never talks to positioning hardware itself; the embedding
//! application supplies a [`LocationProvider`] and the session controller
//! awaits it with a timeout. Capture is the engine's sole suspending
//! operation.

use async_trait::async_trait;
use shared::types::Point;
use std::time::Duration;
use thiserror::Error;

/// Options for a location fix request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Maximum acceptable age of a cached fix; zero forces a fresh fix
    pub max_age: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::ZERO,
        }
    }
}

/// Location capture failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location information unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

impl LocationError {
    /// Stable class identifier for structured error details
    pub fn class(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::PermissionDenied => "permission-denied",
            Self::PositionUnavailable => "position-unavailable",
            Self::Timeout => "timeout",
        }
    }
}

impl From<LocationError> for shared::error::AppError {
    fn from(e: LocationError) -> Self {
        shared::error::AppError::location_unavailable(e.to_string())
            .with_detail("class", e.class())
    }
}

/// Source of device position fixes
///
/// Implementations resolve a single fresh fix per call. There is no
/// cancellation: a fix arriving after the caller gave up is dropped.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self, request: &LocationRequest) -> Result<Point, LocationError>;
}
