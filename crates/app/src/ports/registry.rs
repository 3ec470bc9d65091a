//! Registry port — key/value access to the settings and system services.
//!
//! The bus is treated as a black box: a value lives at a `(service, path)`
//! pair and can be read or written. Adapters decide how that maps onto a
//! transport (D-Bus, in-memory, …).

use std::future::Future;

use whrelay_domain::bus::BusValue;
use whrelay_domain::error::RegistryError;

/// Reads and writes registry values.
pub trait BusRegistry {
    /// Read the value at `path` on `service`.
    fn get_value(
        &self,
        service: &str,
        path: &str,
    ) -> impl Future<Output = Result<BusValue, RegistryError>> + Send;

    /// Write `value` at `path` on `service`.
    fn set_value(
        &self,
        service: &str,
        path: &str,
        value: BusValue,
    ) -> impl Future<Output = Result<(), RegistryError>> + Send;
}

impl<T: BusRegistry + Send + Sync> BusRegistry for std::sync::Arc<T> {
    fn get_value(
        &self,
        service: &str,
        path: &str,
    ) -> impl Future<Output = Result<BusValue, RegistryError>> + Send {
        (**self).get_value(service, path)
    }

    fn set_value(
        &self,
        service: &str,
        path: &str,
        value: BusValue,
    ) -> impl Future<Output = Result<(), RegistryError>> + Send {
        (**self).set_value(service, path, value)
    }
}
