//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `last_update` values.
pub type Timestamp = DateTime<Utc>;

/// Convert seconds since the Unix epoch into a [`Timestamp`].
///
/// Returns `None` when the value is out of chrono's supported range.
#[must_use]
pub fn from_epoch_secs(secs: i64) -> Option<Timestamp> {
    DateTime::from_timestamp(secs, 0)
}
