//! # whrelay-adapter-dbus-zbus
//!
//! D-Bus adapter — implements the [`BusRegistry`] port on top of `zbus`.
//!
//! ## How it works
//!
//! Every Venus OS setting and measurement is a `com.victronenergy.BusItem`
//! object. Reading calls `GetValue()` on the object, writing calls
//! `SetValue(v)`, which answers `0` when the value was accepted.
//!
//! | Bus error | Registry error |
//! |-----------|----------------|
//! | `ServiceUnknown`, `NameHasNoOwner` | `ServiceUnavailable` |
//! | `UnknownObject`, `UnknownMethod`, `UnknownInterface` | `ObjectNotFound` |
//! | anything else | `Call` |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `whrelay-app` and `whrelay-domain`.

mod config;
mod error;
mod value;

pub use config::{BusType, DbusConfig};
pub use error::DbusError;

use zbus::Connection;
use zbus::zvariant::OwnedValue;

use whrelay_app::ports::BusRegistry;
use whrelay_domain::bus::BusValue;
use whrelay_domain::error::RegistryError;

/// Interface implemented by every Venus OS bus item.
pub const BUS_ITEM_INTERFACE: &str = "com.victronenergy.BusItem";

/// Registry backed by a D-Bus connection.
#[derive(Clone)]
pub struct DbusRegistry {
    connection: Connection,
}

impl DbusRegistry {
    /// Connect to the configured bus.
    ///
    /// # Errors
    ///
    /// Returns [`DbusError::Connect`] when the bus cannot be reached or the
    /// address is malformed.
    pub async fn connect(config: &DbusConfig) -> Result<Self, DbusError> {
        let connection = match (&config.address, config.bus) {
            (Some(address), _) => {
                tracing::info!(%address, "connecting to D-Bus");
                zbus::connection::Builder::address(address.as_str())
                    .map_err(DbusError::Connect)?
                    .build()
                    .await
                    .map_err(DbusError::Connect)?
            }
            (None, BusType::System) => {
                tracing::info!("connecting to the D-Bus system bus");
                Connection::system().await.map_err(DbusError::Connect)?
            }
            (None, BusType::Session) => {
                tracing::info!("connecting to the D-Bus session bus");
                Connection::session().await.map_err(DbusError::Connect)?
            }
        };
        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection.
    #[must_use]
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn read(&self, service: &str, path: &str) -> Result<BusValue, DbusError> {
        let reply = self
            .connection
            .call_method(
                Some(service),
                path,
                Some(BUS_ITEM_INTERFACE),
                "GetValue",
                &(),
            )
            .await
            .map_err(DbusError::Call)?;
        let value: OwnedValue = reply.body().deserialize().map_err(DbusError::Call)?;
        Ok(value::from_variant(&value))
    }

    /// Returns the status code answered by `SetValue`.
    #[tracing::instrument(skip(self), level = "trace")]
    async fn write(&self, service: &str, path: &str, value: &BusValue) -> Result<i32, DbusError> {
        let variant = value::to_variant(value)?;
        let reply = self
            .connection
            .call_method(
                Some(service),
                path,
                Some(BUS_ITEM_INTERFACE),
                "SetValue",
                &(variant,),
            )
            .await
            .map_err(DbusError::Call)?;
        reply.body().deserialize().map_err(DbusError::Call)
    }
}

impl BusRegistry for DbusRegistry {
    async fn get_value(&self, service: &str, path: &str) -> Result<BusValue, RegistryError> {
        self.read(service, path)
            .await
            .map_err(|err| err.into_registry(service, path))
    }

    async fn set_value(
        &self,
        service: &str,
        path: &str,
        value: BusValue,
    ) -> Result<(), RegistryError> {
        let code = self
            .write(service, path, &value)
            .await
            .map_err(|err| err.into_registry(service, path))?;
        if code == 0 {
            Ok(())
        } else {
            Err(RegistryError::Rejected {
                service: service.to_string(),
                path: path.to_string(),
                code,
            })
        }
    }
}
