//! Bus layout and the values exchanged with the registries.

use std::fmt;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::relay::RelaySlotId;

/// A value read from or written to a registry object.
#[derive(Debug, Clone, PartialEq)]
pub enum BusValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// The object exists but currently holds no value.
    Invalid,
}

impl BusValue {
    /// Integer view of the value.
    ///
    /// Floats are accepted when they hold a whole number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Text view of the value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for BusValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for BusValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for BusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Where the relay labels, relay states, and AC input source live on the bus.
///
/// Defaults match Venus OS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusLayout {
    /// Service holding the relay labels.
    pub settings_service: String,
    /// Service holding the relay states and the AC input source.
    pub system_service: String,
    /// Base path of the per-relay settings (`{base}/{slot}/CustomName`).
    pub settings_relay_base: String,
    /// Base path of the relay states (`{base}/{slot}/State`).
    pub relay_base: String,
    /// Path of the active AC input source.
    pub ac_source_path: String,
}

impl Default for BusLayout {
    fn default() -> Self {
        Self {
            settings_service: "com.victronenergy.settings".to_string(),
            system_service: "com.victronenergy.system".to_string(),
            settings_relay_base: "/Settings/Relay".to_string(),
            relay_base: "/Relay".to_string(),
            ac_source_path: "/Ac/ActiveIn/Source".to_string(),
        }
    }
}

impl BusLayout {
    /// Path of a relay's label in the settings service.
    #[must_use]
    pub fn custom_name_path(&self, slot: RelaySlotId) -> String {
        format!("{}/{slot}/CustomName", self.settings_relay_base)
    }

    /// Path of a relay's state in the system service.
    #[must_use]
    pub fn relay_state_path(&self, slot: RelaySlotId) -> String {
        format!("{}/{slot}/State", self.relay_base)
    }

    /// Check that no field is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyLayoutField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("settings_service", &self.settings_service),
            ("system_service", &self.system_service),
            ("settings_relay_base", &self.settings_relay_base),
            ("relay_base", &self.relay_base),
            ("ac_source_path", &self.ac_source_path),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyLayoutField { field });
            }
        }
        Ok(())
    }
}
