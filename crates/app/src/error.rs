//! Registry error types.

use gatehub_domain::error::GatewayError;
use gatehub_domain::id::DeviceId;

/// Errors returned by [`DeviceRegistry`](crate::registry::DeviceRegistry) operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No device with this id is registered.
    #[error("unknown device {0}")]
    UnknownDevice(DeviceId),

    /// The device operation itself failed.
    #[error("device operation failed")]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unknown_device_id() {
        let err = RegistryError::UnknownDevice(DeviceId::new(12));
        assert_eq!(err.to_string(), "unknown device 12");
    }

    #[test]
    fn should_convert_gateway_error() {
        let err: RegistryError = GatewayError::MissingId.into();
        assert!(matches!(err, RegistryError::Gateway(GatewayError::MissingId)));
    }
}
