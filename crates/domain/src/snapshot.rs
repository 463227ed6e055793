//! Snapshot — the last-known field mapping reported for a device.
//!
//! The mapping is open: any key the gateway sends is kept, and no key is
//! required. A JSON `null` is stored as [`FieldValue::Null`] but reads back as
//! absent through [`Snapshot::get`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::fields;
use crate::id::DeviceId;
use crate::value::FieldValue;

/// Field name → value mapping for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, FieldValue>);

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a gateway JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Json`] if the payload is not a JSON object.
    /// Non-scalar values are kept as [`FieldValue::Other`].
    pub fn from_json(payload: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Look up a field, treating an explicit `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Look up a string field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    /// Look up an integer field.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_i64)
    }

    /// Identifier field, preferring `number` over the legacy `id`.
    ///
    /// The legacy field is only consulted when `number` is absent or null.
    #[must_use]
    pub fn raw_id(&self) -> Option<&FieldValue> {
        self.get(fields::NUMBER).or_else(|| self.get(fields::ID))
    }

    /// Numeric identifier, see [`raw_id`](Self::raw_id).
    #[must_use]
    pub fn device_id(&self) -> Option<DeviceId> {
        self.raw_id().and_then(DeviceId::from_value)
    }

    /// Whether the key is stored, including as an explicit `null`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or overwrite a single field, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    /// Overwrite or insert every field of `other`; fields missing from
    /// `other` keep their current value.
    pub fn merge(&mut self, other: Snapshot) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Snapshot {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
