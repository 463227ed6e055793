//! Numeric device identifier assigned by the gateway.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Identifier of a device on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Interpret a snapshot value as an identifier.
    ///
    /// Returns `None` for negative, out-of-range or non-numeric values.
    #[must_use]
    pub fn from_value(value: &FieldValue) -> Option<Self> {
        value
            .as_i64()
            .and_then(|raw| u32::try_from(raw).ok())
            .map(Self)
    }

    /// Access the raw number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DeviceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<DeviceId> for FieldValue {
    fn from(id: DeviceId) -> Self {
        FieldValue::Int(i64::from(id.0))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DeviceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
