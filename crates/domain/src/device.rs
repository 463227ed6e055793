//! Device record — the cached state of one device exposed by the gateway.
//!
//! A record holds the last-known [`Snapshot`] and a shared handle to the
//! transport used by concrete device kinds to talk to the gateway. The record
//! itself never touches the transport; it only merges snapshots and reads
//! fields out of them.

use std::sync::Arc;

use crate::error::DomainError;
use crate::fields;
use crate::id::DeviceId;
use crate::snapshot::Snapshot;
use crate::time::{self, Timestamp};
use crate::value::FieldValue;

/// Cached snapshot of a gateway device plus its transport handle.
///
/// `T` is the transport capability; it is `?Sized` so the application layer
/// can store a trait object (`DeviceRecord<dyn Transport>`).
pub struct DeviceRecord<T: ?Sized> {
    state: Snapshot,
    api: Arc<T>,
}

impl<T: ?Sized> DeviceRecord<T> {
    /// Create a record from an initial snapshot. Nothing is validated.
    #[must_use]
    pub fn new(state: Snapshot, api: Arc<T>) -> Self {
        Self { state, api }
    }

    /// Create a record with no known state yet.
    #[must_use]
    pub fn empty(api: Arc<T>) -> Self {
        Self::new(Snapshot::new(), api)
    }

    /// Apply a fresh, possibly partial, snapshot reported by the gateway.
    ///
    /// Every field of `update` overwrites the stored one; fields missing from
    /// `update` are retained. When nothing is stored yet the update becomes
    /// the state as-is.
    pub fn apply_update(&mut self, update: Snapshot) {
        if self.state.is_empty() {
            self.state = update;
        } else {
            self.state.merge(update);
        }
    }

    #[must_use]
    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    /// The transport handle shared with the rest of the integration.
    #[must_use]
    pub fn api(&self) -> &Arc<T> {
        &self.api
    }

    /// Identifier field, preferring `number` over the legacy `id`.
    ///
    /// The legacy field is only consulted when `number` is absent or null.
    #[must_use]
    pub fn raw_id(&self) -> Option<&FieldValue> {
        self.state.raw_id()
    }

    /// Numeric identifier of this device, see [`raw_id`](Self::raw_id).
    #[must_use]
    pub fn id(&self) -> Option<DeviceId> {
        self.state.device_id()
    }

    /// Type label. A type that is not a string reads as `None`.
    #[must_use]
    pub fn device_type(&self) -> Option<&str> {
        self.state.get_str(fields::TYPE)
    }

    /// Human-readable name.
    ///
    /// A name that is present but not a string reads as `None`; the raw value
    /// stays available through [`state`](Self::state).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.state.get_str(fields::NAME)
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.state.get(fields::VALUE)
    }

    /// Value the gateway is trying to set on the device.
    ///
    /// While it differs from [`value`](Self::value) the update is still in
    /// flight; once both match the value has been applied.
    #[must_use]
    pub fn new_value(&self) -> Option<&FieldValue> {
        self.state.get(fields::NEW_VALUE)
    }

    /// Whether the gateway is still applying a new value.
    ///
    /// Numbers are compared by magnitude, so a pending `60` matches a
    /// reported `60.0`.
    #[must_use]
    pub fn is_updating(&self) -> bool {
        match (self.new_value(), self.value()) {
            (Some(pending), Some(current)) => !pending.same_as(current),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Unit of [`value`](Self::value).
    ///
    /// A unit that is present but not a string reads as `None`; the raw value
    /// stays available through [`state`](Self::state).
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.state.get_str(fields::UNIT)
    }

    /// Last update, in seconds since the Unix epoch.
    #[must_use]
    pub fn last_update(&self) -> Option<i64> {
        self.state.get_i64(fields::UTIME)
    }

    #[must_use]
    pub fn last_updated_at(&self) -> Option<Timestamp> {
        self.last_update().and_then(time::from_epoch_secs)
    }

    /// Whether the device is enabled on the gateway.
    ///
    /// A device is disabled when its type label contains the disabled
    /// marker. Unlike the other accessors this one requires the field.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] whenever
    /// [`device_type`](Self::device_type) is `None`: the type is absent, null,
    /// or not a string.
    pub fn enabled(&self) -> Result<bool, DomainError> {
        let kind = self.device_type().ok_or(DomainError::MissingField {
            field: fields::TYPE,
        })?;
        Ok(!kind.contains(fields::DISABLED_MARKER))
    }
}

impl<T: ?Sized> Clone for DeviceRecord<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: Arc::clone(&self.api),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for DeviceRecord<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRecord")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoApi;

    fn record(pairs: &[(&str, FieldValue)]) -> DeviceRecord<NoApi> {
        let state = pairs
            .iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect();
        DeviceRecord::new(state, Arc::new(NoApi))
    }

    fn snapshot(pairs: &[(&str, &str)]) -> Snapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn should_merge_partial_update_into_existing_state() {
        let mut device = DeviceRecord::new(
            snapshot(&[("name", "Lamp"), ("value", "0")]),
            Arc::new(NoApi),
        );
        device.apply_update(snapshot(&[("value", "1")]));
        assert_eq!(device.state(), &snapshot(&[("name", "Lamp"), ("value", "1")]));
    }

    #[test]
    fn should_take_update_as_is_when_state_is_empty() {
        let mut device = DeviceRecord::empty(Arc::new(NoApi));
        device.apply_update(snapshot(&[("value", "5")]));
        assert_eq!(device.state(), &snapshot(&[("value", "5")]));
    }

    #[test]
    fn should_be_idempotent_when_applying_same_update_twice() {
        let mut once = DeviceRecord::new(snapshot(&[("name", "Lamp")]), Arc::new(NoApi));
        let update = snapshot(&[("value", "1"), ("unit", "%")]);
        once.apply_update(update.clone());
        let mut twice = once.clone();
        twice.apply_update(update);
        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn should_prefer_number_over_legacy_id() {
        let device = record(&[("number", 4.into()), ("id", 9.into())]);
        assert_eq!(device.id(), Some(DeviceId::new(4)));
    }

    #[test]
    fn should_fall_back_to_legacy_id() {
        let device = record(&[("id", 9.into())]);
        assert_eq!(device.id(), Some(DeviceId::new(9)));
    }

    #[test]
    fn should_fall_back_to_legacy_id_when_number_is_null() {
        let device = record(&[("number", FieldValue::Null), ("id", 9.into())]);
        assert_eq!(device.id(), Some(DeviceId::new(9)));
    }

    #[test]
    fn should_return_no_id_when_both_fields_are_missing() {
        let device = record(&[("name", "Lamp".into())]);
        assert_eq!(device.id(), None);
        assert_eq!(device.raw_id(), None);
    }

    #[test]
    fn should_read_every_recognized_field() {
        let device = record(&[
            ("type", "dimmer".into()),
            ("name", "Hall".into()),
            ("value", 40.into()),
            ("newvalue", 60.into()),
            ("unit", "%".into()),
            ("utime", 1_500_000_000.into()),
        ]);
        assert_eq!(device.device_type(), Some("dimmer"));
        assert_eq!(device.name(), Some("Hall"));
        assert_eq!(device.value(), Some(&FieldValue::Int(40)));
        assert_eq!(device.new_value(), Some(&FieldValue::Int(60)));
        assert_eq!(device.unit(), Some("%"));
        assert_eq!(device.last_update(), Some(1_500_000_000));
        assert_eq!(
            device.last_updated_at().map(|ts| ts.timestamp()),
            Some(1_500_000_000)
        );
    }

    #[test]
    fn should_return_none_for_every_missing_field() {
        let device = DeviceRecord::empty(Arc::new(NoApi));
        assert_eq!(device.device_type(), None);
        assert_eq!(device.name(), None);
        assert_eq!(device.value(), None);
        assert_eq!(device.new_value(), None);
        assert_eq!(device.unit(), None);
        assert_eq!(device.last_update(), None);
        assert_eq!(device.last_updated_at(), None);
    }

    #[test]
    fn should_report_updating_while_new_value_differs() {
        let device = record(&[("value", 40.into()), ("newvalue", 60.into())]);
        assert!(device.is_updating());

        let settled = record(&[("value", 60.into()), ("newvalue", 60.into())]);
        assert!(!settled.is_updating());
    }

    #[test]
    fn should_not_report_updating_when_encodings_differ() {
        let device = record(&[("value", 60.0.into()), ("newvalue", 60.into())]);
        assert!(!device.is_updating());
    }

    #[test]
    fn should_read_non_string_name_and_unit_as_none() {
        let device = record(&[("name", 12.into()), ("unit", true.into())]);
        assert_eq!(device.name(), None);
        assert_eq!(device.unit(), None);
        assert_eq!(device.state().get("name"), Some(&FieldValue::Int(12)));
    }

    #[test]
    fn should_fail_enabled_when_type_is_not_a_string() {
        let device = record(&[("type", 3.into())]);
        assert_eq!(device.device_type(), None);
        assert!(matches!(
            device.enabled(),
            Err(DomainError::MissingField { field: "type" })
        ));
    }

    #[test]
    fn should_report_disabled_when_type_contains_marker() {
        assert!(!record(&[("type", "disabled".into())]).enabled().unwrap());
        assert!(!record(&[("type", "switch_disabled".into())]).enabled().unwrap());
    }

    #[test]
    fn should_report_enabled_when_type_has_no_marker() {
        assert!(record(&[("type", "switch".into())]).enabled().unwrap());
    }

    #[test]
    fn should_fail_enabled_when_type_is_missing() {
        let result = record(&[("name", "Lamp".into())]).enabled();
        assert!(matches!(
            result,
            Err(DomainError::MissingField { field: "type" })
        ));
    }

    #[test]
    fn should_share_transport_handle_when_cloned() {
        let device = DeviceRecord::empty(Arc::new(NoApi));
        let copy = device.clone();
        assert!(Arc::ptr_eq(device.api(), copy.api()));
    }
}
