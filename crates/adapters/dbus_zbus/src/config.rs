//! D-Bus connection configuration.

/// Which message bus to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusType {
    /// The system bus (Venus OS services live here).
    #[default]
    System,
    /// The per-user session bus, handy on a development machine.
    Session,
}

/// Configuration for the D-Bus registry adapter.
#[derive(Debug, Clone, Default)]
pub struct DbusConfig {
    /// Bus to connect to when no explicit address is given.
    pub bus: BusType,
    /// Explicit bus address (e.g. `tcp:host=venus.local,port=78`), takes
    /// precedence over `bus`.
    pub address: Option<String>,
}
