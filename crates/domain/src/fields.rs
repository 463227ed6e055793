//! Field names recognized in a gateway device snapshot.

/// Primary numeric identifier.
pub const NUMBER: &str = "number";
/// Legacy identifier, consulted when [`NUMBER`] is absent.
pub const ID: &str = "id";
/// Type label; also carries the [`DISABLED_MARKER`].
pub const TYPE: &str = "type";
pub const NAME: &str = "name";
/// Current value.
pub const VALUE: &str = "value";
/// Target value while the gateway is still applying an update.
pub const NEW_VALUE: &str = "newvalue";
pub const UNIT: &str = "unit";
/// Last update, in seconds since the Unix epoch.
pub const UTIME: &str = "utime";

/// Token found in the type label of a disabled device.
pub const DISABLED_MARKER: &str = "disabled";
