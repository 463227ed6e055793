//! Device capability — the operations each concrete device kind provides.
//!
//! A concrete kind (switch, dimmer, sensor, …) wraps a [`Record`] and
//! implements [`Device::set_value`] and [`Device::refresh`] on top of the
//! record's transport, usually through [`send_value`] and [`refresh_from`].
//! The generic record implements the trait too, but refuses both operations.

use gatehub_domain::device::DeviceRecord;
use gatehub_domain::error::{DomainError, GatewayError};
use gatehub_domain::id::DeviceId;
use gatehub_domain::value::FieldValue;

use crate::ports::Transport;

/// Device record holding a shared [`Transport`] handle.
pub type Record = DeviceRecord<dyn Transport>;

/// A controllable device exposed by the gateway.
pub trait Device: Send {
    /// The cached state of this device.
    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    /// Send `value` to the gateway for this device.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotImplemented`] if the kind does not support
    /// it, or any error from the transport.
    fn set_value(&mut self, value: FieldValue) -> Result<(), GatewayError>;

    /// Re-fetch this device from the gateway and merge the result into the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotImplemented`] if the kind does not support
    /// it, or any error from the transport.
    fn refresh(&mut self) -> Result<(), GatewayError>;

    fn id(&self) -> Option<DeviceId> {
        self.record().id()
    }

    fn name(&self) -> Option<&str> {
        self.record().name()
    }

    /// See [`DeviceRecord::enabled`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] when the snapshot has no type.
    fn enabled(&self) -> Result<bool, DomainError> {
        self.record().enabled()
    }
}

impl Device for Record {
    fn record(&self) -> &Record {
        self
    }

    fn record_mut(&mut self) -> &mut Record {
        self
    }

    fn set_value(&mut self, _value: FieldValue) -> Result<(), GatewayError> {
        Err(GatewayError::NotImplemented {
            operation: "set_value",
        })
    }

    fn refresh(&mut self) -> Result<(), GatewayError> {
        Err(GatewayError::NotImplemented {
            operation: "refresh",
        })
    }
}

/// Fetch the record's current state through its transport and merge it in.
///
/// # Errors
///
/// Returns [`GatewayError::MissingId`] if the record has no identifier, or the
/// transport error. The record is left untouched on error.
#[tracing::instrument(skip(record), fields(device_id = tracing::field::Empty))]
pub fn refresh_from(record: &mut Record) -> Result<(), GatewayError> {
    let id = record.id().ok_or(GatewayError::MissingId)?;
    tracing::Span::current().record("device_id", tracing::field::display(id));
    let snapshot = record.api().fetch_state(id)?;
    tracing::debug!(fields = snapshot.len(), "applying fetched snapshot");
    record.apply_update(snapshot);
    Ok(())
}

/// Send a new value for the record's device through its transport.
///
/// # Errors
///
/// Returns [`GatewayError::MissingId`] if the record has no identifier, or the
/// transport error.
#[tracing::instrument(skip(record), fields(device_id = tracing::field::Empty))]
pub fn send_value(record: &Record, value: &FieldValue) -> Result<(), GatewayError> {
    let id = record.id().ok_or(GatewayError::MissingId)?;
    tracing::Span::current().record("device_id", tracing::field::display(id));
    record.api().send_value(id, value)
}
