//! Device registry — owns the devices of one gateway integration.
//!
//! Devices are keyed by their gateway id. Gateway listings are routed to the
//! matching record as partial updates; refresh sweeps visit every device and
//! collect failures instead of stopping at the first one.
//!
//! Every operation that can mutate a device re-keys it afterwards, so the key
//! always matches [`Device::id`]. A device whose identifier fields are
//! cleared keeps its previous key.
//!
//! The registry is not synchronised: every mutating call takes `&mut self`,
//! so callers serialise access by owning it.

use std::collections::BTreeMap;

use gatehub_domain::error::GatewayError;
use gatehub_domain::id::DeviceId;
use gatehub_domain::snapshot::Snapshot;
use gatehub_domain::value::FieldValue;

use crate::config::RegistryConfig;
use crate::device::Device;
use crate::error::RegistryError;

/// Outcome of [`DeviceRegistry::apply_updates`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Snapshots merged into a registered device.
    pub applied: usize,
    /// Snapshots without an id or for an unregistered device.
    pub skipped: usize,
}

/// The devices of one gateway, keyed by id.
pub struct DeviceRegistry {
    config: RegistryConfig,
    devices: BTreeMap<DeviceId, Box<dyn Device>>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl DeviceRegistry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            devices: BTreeMap::new(),
        }
    }

    /// Register a device under its current id, replacing any device already
    /// registered with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingId`] if the device has no identifier.
    #[tracing::instrument(skip(self, device), fields(device_name = device.name().unwrap_or_default()))]
    pub fn register(&mut self, device: Box<dyn Device>) -> Result<DeviceId, GatewayError> {
        let id = device.id().ok_or(GatewayError::MissingId)?;
        if self.devices.insert(id, device).is_some() {
            tracing::debug!(%id, "replaced registered device");
        }
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: DeviceId) -> Option<&(dyn Device + 'static)> {
        self.devices.get(&id).map(|device| &**device)
    }

    /// Run `f` against a registered device, then re-key it if `f` changed
    /// its identifier. Returns `None` if no device has this id.
    pub fn update<R>(
        &mut self,
        id: DeviceId,
        f: impl FnOnce(&mut (dyn Device + 'static)) -> R,
    ) -> Option<R> {
        let device = self.devices.get_mut(&id)?;
        let result = f(&mut **device);
        self.rekey(id);
        Some(result)
    }

    pub fn remove(&mut self, id: DeviceId) -> Option<Box<dyn Device>> {
        self.devices.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Registered ids, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.devices.keys().copied()
    }

    /// Merge each snapshot into the registered device with the same id.
    ///
    /// Identifier fields in the snapshot are merged like any other field;
    /// the device is re-keyed if they moved it.
    #[tracing::instrument(skip_all)]
    pub fn apply_updates<I>(&mut self, snapshots: I) -> UpdateSummary
    where
        I: IntoIterator<Item = Snapshot>,
    {
        let mut summary = UpdateSummary::default();
        for snapshot in snapshots {
            let Some(id) = snapshot.device_id() else {
                tracing::warn!("skipping update without device id");
                summary.skipped += 1;
                continue;
            };
            match self.devices.get_mut(&id) {
                Some(device) => {
                    device.record_mut().apply_update(snapshot);
                    self.rekey(id);
                    summary.applied += 1;
                }
                None => {
                    tracing::warn!(%id, "skipping update for unregistered device");
                    summary.skipped += 1;
                }
            }
        }
        tracing::debug!(
            applied = summary.applied,
            skipped = summary.skipped,
            "applied gateway updates"
        );
        summary
    }

    /// Send a new value to a registered device.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDevice`] if no device has this id, or
    /// the device's own error.
    #[tracing::instrument(skip(self))]
    pub fn set_value(&mut self, id: DeviceId, value: FieldValue) -> Result<(), RegistryError> {
        let device = self
            .devices
            .get_mut(&id)
            .ok_or(RegistryError::UnknownDevice(id))?;
        let result = device.set_value(value);
        self.rekey(id);
        result.map_err(RegistryError::from)
    }

    /// Refresh a single registered device.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDevice`] if no device has this id, or
    /// the device's own error.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self, id: DeviceId) -> Result<(), RegistryError> {
        let device = self
            .devices
            .get_mut(&id)
            .ok_or(RegistryError::UnknownDevice(id))?;
        let result = device.refresh();
        self.rekey(id);
        result.map_err(RegistryError::from)
    }

    /// Refresh every registered device and return the ones that failed.
    ///
    /// Devices reported as disabled are skipped unless
    /// [`RegistryConfig::refresh_disabled`] is set. A device without a type
    /// field cannot tell whether it is disabled and is refreshed.
    #[tracing::instrument(skip(self))]
    pub fn refresh_all(&mut self) -> Vec<(DeviceId, GatewayError)> {
        let mut failures = Vec::new();
        let mut moved = Vec::new();
        for (id, device) in &mut self.devices {
            match device.enabled() {
                Ok(false) if !self.config.refresh_disabled => {
                    tracing::debug!(%id, "skipping disabled device");
                    continue;
                }
                Err(err) => {
                    tracing::debug!(%id, error = %err, "refreshing device of unknown status");
                }
                Ok(_) => {}
            }
            if let Err(err) = device.refresh() {
                tracing::warn!(%id, error = %err, "failed to refresh device");
                failures.push((*id, err));
            }
            if device.id().is_some_and(|current| current != *id) {
                moved.push(*id);
            }
        }
        for id in moved {
            self.rekey(id);
        }
        failures
    }

    /// Move the device under `key` to its current id, if that changed.
    fn rekey(&mut self, key: DeviceId) {
        let Some(current) = self.devices.get(&key).and_then(|device| device.id()) else {
            return;
        };
        if current == key {
            return;
        }
        if let Some(device) = self.devices.remove(&key) {
            tracing::debug!(from = %key, to = %current, "device identifier changed");
            if self.devices.insert(current, device).is_some() {
                tracing::warn!(id = %current, "re-keyed device replaced a registered device");
            }
        }
    }
}

impl std::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("config", &self.config)
            .field("devices", &self.devices.keys().collect::<Vec<_>>())
            .finish()
    }
}
