//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `whrelay.toml` in the working directory, or at the path named by
//! `WHRELAY_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use whrelay_adapter_dbus_zbus::{BusType, DbusConfig};
use whrelay_app::config::{ControllerConfig, Intervals};
use whrelay_domain::bus::BusLayout;
use whrelay_domain::error::ValidationError;
use whrelay_domain::relay::TargetLabels;

const DEFAULT_PATH: &str = "whrelay.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which registry to talk to.
    pub bus: BusConfig,
    /// What relay to look for.
    pub relay: RelayConfig,
    /// Step intervals.
    pub timing: TimingConfig,
    /// Service names and object paths.
    pub registry: BusLayout,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Registry backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// D-Bus system bus.
    #[default]
    System,
    /// D-Bus session bus.
    Session,
    /// In-memory demo registry.
    Virtual,
}

impl BusKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "session" => Some(Self::Session),
            "virtual" => Some(Self::Virtual),
            _ => None,
        }
    }
}

/// Bus connection settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Backend to use.
    pub kind: BusKind,
    /// Explicit D-Bus address, overrides `kind` for the D-Bus backends.
    pub address: Option<String>,
}

/// Relay discovery settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Labels identifying the water heater relay.
    pub target_labels: Vec<String>,
    /// Number of slots probed, `0..max_slots`.
    pub max_slots: u32,
}

/// Step intervals, in seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub discovery_interval_secs: u64,
    pub initialize_interval_secs: u64,
    pub monitor_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `whrelay.toml` (or `WHRELAY_CONFIG`) if
    /// present, then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, an
    /// override cannot be parsed, or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WHRELAY_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.controller()?;
        config.log_filter()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("WHRELAY_BUS") {
            self.bus.kind = BusKind::parse(&val).ok_or(ConfigError::Env {
                name: "WHRELAY_BUS",
                value: val,
            })?;
        }
        if let Some(val) = var("WHRELAY_BUS_ADDRESS") {
            self.bus.address = Some(val);
        }
        if let Some(val) = var("WHRELAY_TARGET_LABELS") {
            self.relay.target_labels = val.split(',').map(|l| l.trim().to_string()).collect();
        }
        if let Some(val) = var("WHRELAY_MAX_SLOTS") {
            self.relay.max_slots = val.trim().parse().map_err(|_| ConfigError::Env {
                name: "WHRELAY_MAX_SLOTS",
                value: val,
            })?;
        }
        if let Some(val) = var("WHRELAY_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Build the validated controller configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a label is blank, no slot or label
    /// is configured, an interval is zero, or a layout field is empty.
    pub fn controller(&self) -> Result<ControllerConfig, ValidationError> {
        let config = ControllerConfig {
            target_labels: TargetLabels::new(self.relay.target_labels.iter().cloned())?,
            max_slots: self.relay.max_slots,
            intervals: Intervals {
                discovery: Duration::from_secs(self.timing.discovery_interval_secs),
                initialize: Duration::from_secs(self.timing.initialize_interval_secs),
                monitor: Duration::from_secs(self.timing.monitor_interval_secs),
            },
            layout: self.registry.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the logging filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFilter`] when the directive is malformed.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.logging.filter).map_err(|source| ConfigError::LogFilter {
            filter: self.logging.filter.clone(),
            source,
        })
    }

    /// D-Bus adapter settings. `None` for the virtual backend.
    #[must_use]
    pub fn dbus(&self) -> Option<DbusConfig> {
        let bus = match self.bus.kind {
            BusKind::System => BusType::System,
            BusKind::Session => BusType::Session,
            BusKind::Virtual => return None,
        };
        Some(DbusConfig {
            bus,
            address: self.bus.address.clone(),
        })
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            target_labels: TargetLabels::default().as_slice().to_vec(),
            max_slots: 10,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            discovery_interval_secs: 5,
            initialize_interval_secs: 1,
            monitor_interval_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "whrelayd=info,whrelay=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },
    /// Semantic validation failure.
    #[error("invalid configuration")]
    Validation(#[from] ValidationError),
    /// Malformed logging filter.
    #[error("invalid log filter {filter:?}")]
    LogFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
}
