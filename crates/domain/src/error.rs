//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Foreign errors from the transport are boxed so the domain stays free of
//! IO crates.

/// Errors raised by domain logic (snapshot parsing, strict lookups).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A field that the operation requires is absent from the snapshot.
    #[error("missing field {field:?} in device snapshot")]
    MissingField { field: &'static str },

    /// The gateway payload is not a JSON object of scalar values.
    #[error("invalid snapshot payload")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by device operations (`set_value`, `refresh`).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The operation is not provided by this device kind.
    #[error("{operation} is not implemented for this device")]
    NotImplemented { operation: &'static str },

    /// The record carries no usable identifier, so the gateway cannot be addressed.
    #[error("device has no identifier")]
    MissingId,

    /// A domain-level error.
    #[error("domain error")]
    Domain(#[from] DomainError),

    /// The transport failed to reach the gateway or rejected the request.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wrap a transport-specific error.
    #[must_use]
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
