//! D-Bus adapter error types.

use whrelay_domain::error::RegistryError;

/// D-Bus error names meaning the service has no owner on the bus.
const SERVICE_MISSING: [&str; 2] = [
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
];

/// D-Bus error names meaning the service does not publish the object.
const OBJECT_MISSING: [&str; 3] = [
    "org.freedesktop.DBus.Error.UnknownObject",
    "org.freedesktop.DBus.Error.UnknownMethod",
    "org.freedesktop.DBus.Error.UnknownInterface",
];

/// Errors specific to the D-Bus adapter.
#[derive(Debug, thiserror::Error)]
pub enum DbusError {
    /// Could not open a connection to the bus.
    #[error("failed to connect to D-Bus")]
    Connect(#[source] zbus::Error),

    /// A `GetValue`/`SetValue` call failed.
    #[error("D-Bus call failed")]
    Call(#[source] zbus::Error),

    /// The value cannot be sent over the bus.
    #[error("value {0} cannot be written over D-Bus")]
    UnsupportedValue(String),
}

/// What a D-Bus error name says about the addressed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Missing {
    Service,
    Object,
}

pub(crate) fn classify(error_name: &str) -> Option<Missing> {
    if SERVICE_MISSING.contains(&error_name) {
        Some(Missing::Service)
    } else if OBJECT_MISSING.contains(&error_name) {
        Some(Missing::Object)
    } else {
        None
    }
}

impl DbusError {
    fn missing(&self) -> Option<Missing> {
        match self {
            Self::Call(zbus::Error::MethodError(name, _, _)) => classify(name.as_str()),
            _ => None,
        }
    }

    /// Convert into a [`RegistryError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_registry(self, service: &str, path: &str) -> RegistryError {
        match self.missing() {
            Some(Missing::Service) => RegistryError::ServiceUnavailable {
                service: service.to_string(),
            },
            Some(Missing::Object) => RegistryError::ObjectNotFound {
                service: service.to_string(),
                path: path.to_string(),
            },
            None => RegistryError::Call {
                service: service.to_string(),
                path: path.to_string(),
                source: Box::new(self),
            },
        }
    }
}
