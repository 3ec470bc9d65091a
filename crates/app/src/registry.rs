//! Registry access helpers shared by the locator and the controller.
//!
//! Both helpers swallow errors: reads return `None`, writes return `false`.
//! Missing services and objects are expected (probing unconfigured slots,
//! services still starting) and only traced. Failed calls on objects that do
//! exist, and every failed write, are logged at error level.

use whrelay_domain::bus::BusValue;

use crate::ports::BusRegistry;

/// Error-swallowing wrapper around a [`BusRegistry`].
pub struct RegistryAccess<R> {
    registry: R,
}

impl<R: BusRegistry> RegistryAccess<R> {
    /// Wrap a registry adapter.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Access the wrapped adapter.
    pub fn inner(&self) -> &R {
        &self.registry
    }

    /// Read a value, or `None` if it cannot be read.
    pub async fn read_value(&self, service: &str, path: &str) -> Option<BusValue> {
        match self.registry.get_value(service, path).await {
            Ok(value) => Some(value),
            Err(err) if err.is_missing() => {
                tracing::trace!(%err, service, path, "bus value not present");
                None
            }
            Err(err) => {
                tracing::error!(%err, service, path, "failed to read bus value");
                None
            }
        }
    }

    /// Write a value. Returns whether the registry accepted it.
    pub async fn write_value(&self, service: &str, path: &str, value: BusValue) -> bool {
        match self.registry.set_value(service, path, value).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, service, path, "failed to write bus value");
                false
            }
        }
    }
}
