//! Transport port — the gateway capability used by concrete device kinds.
//!
//! The HTTP client that talks to the gateway lives outside this workspace and
//! implements [`Transport`]. Records only keep a shared handle to it.

use std::sync::Arc;

use gatehub_domain::error::GatewayError;
use gatehub_domain::id::DeviceId;
use gatehub_domain::snapshot::Snapshot;
use gatehub_domain::value::FieldValue;

/// Read/write access to devices on the gateway.
///
/// Calls are synchronous and are not retried; failures come back as
/// [`GatewayError::Transport`] (or any other [`GatewayError`] the
/// implementation sees fit).
pub trait Transport: Send + Sync {
    /// Fetch the current state of a device. The returned snapshot may be partial.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be reached or rejects the request.
    fn fetch_state(&self, id: DeviceId) -> Result<Snapshot, GatewayError>;

    /// Send a new target value for a device.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be reached or rejects the value.
    fn send_value(&self, id: DeviceId, value: &FieldValue) -> Result<(), GatewayError>;
}

/// Transport handle shared by every record of an integration.
pub type SharedTransport = Arc<dyn Transport>;
