//! # whrelay-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the [`BusRegistry`](ports::BusRegistry) port that bus adapters implement
//! - Wrap it in [`RegistryAccess`](registry::RegistryAccess), which swallows
//!   errors into `None`/`false` and decides what is worth logging
//! - Locate the target relay ([`RelayLocator`](locator::RelayLocator))
//! - Run the initialize and monitor steps against the controller state
//!   ([`WaterHeaterController`](controller::WaterHeaterController))
//! - Sequence the three steps on their timers
//!   ([`Scheduler`](scheduler::Scheduler))
//!
//! ## Dependency rule
//! Depends on `whrelay-domain` only (plus `tokio::time` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config;
pub mod controller;
pub mod locator;
pub mod ports;
pub mod registry;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;
