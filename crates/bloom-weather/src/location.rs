//! Permission and location seams.
//!
//! The platform owns the permission dialog and the "last known location"
//! cache; these traits are what the display flow needs from it.

use crate::types::{Coordinates, LocationError};
use std::future::Future;

/// Request code attached to the location permission prompt
pub const LOCATION_PERMISSION_REQUEST_CODE: u32 = 1001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Location permission checks and prompts
pub trait PermissionGate: Send + Sync + 'static {
    /// Current authorization, without prompting
    fn check(&self) -> PermissionStatus;

    /// Show the platform prompt and resolve with the user's answer
    fn request(&self, request_code: u32) -> impl Future<Output = PermissionStatus> + Send;
}

/// Platform "last known location" query
pub trait LocationSource: Send + Sync + 'static {
    /// `Ok(None)` means the platform has no cached fix
    fn last_known_location(
        &self,
    ) -> impl Future<Output = Result<Option<Coordinates>, LocationError>> + Send;
}

/// Last known position, with "no fix" folded into the error path
pub async fn resolve_location<L: LocationSource + ?Sized>(
    source: &L,
) -> Result<Coordinates, LocationError> {
    match source.last_known_location().await {
        Ok(Some(coordinates)) => {
            tracing::info!(
                "Got location: {}, {}",
                coordinates.latitude,
                coordinates.longitude
            );
            Ok(coordinates)
        }
        Ok(None) => Err(LocationError::NoLastKnownFix),
        Err(e) => Err(e),
    }
}

/// Permission gate with a fixed answer, for hosts without a permission model
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission {
    pub current: PermissionStatus,
    pub on_request: PermissionStatus,
}

impl FixedPermission {
    pub fn granted() -> Self {
        Self {
            current: PermissionStatus::Granted,
            on_request: PermissionStatus::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            current: PermissionStatus::Denied,
            on_request: PermissionStatus::Denied,
        }
    }
}

impl PermissionGate for FixedPermission {
    fn check(&self) -> PermissionStatus {
        self.current
    }

    async fn request(&self, _request_code: u32) -> PermissionStatus {
        self.on_request
    }
}

/// Location source that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationSource for FixedLocation {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, LocationError> {
        Ok(Some(self.0))
    }
}

/// Hosts with no location service at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocationService;

impl LocationSource for NoLocationService {
    async fn last_known_location(&self) -> Result<Option<Coordinates>, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}
