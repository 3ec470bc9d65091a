//! # whrelay-domain
//!
//! Pure domain model for the water heater relay supervisor.
//!
//! ## Responsibilities
//! - Foundational types: relay slot identifiers, relay states, error conventions
//! - Define the **bus layout** (which service/path holds labels, relay states,
//!   and the active AC input source) and the [`BusValue`](bus::BusValue) exchanged with it
//! - Classify **AC input source** codes and derive the relay command
//! - Model episode-based warning suppression as a [`WarningLatch`](warning::WarningLatch)
//! - Hold the single **controller state** and its invariants
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod ac_source;
pub mod bus;
pub mod relay;
pub mod state;
pub mod warning;
