//! Controller state — the single record mutated by the locate, initialize,
//! and monitor steps.

use crate::bus::BusValue;
use crate::relay::RelaySlotId;
use crate::warning::WarningLatch;

/// Process-wide state of the water heater controller.
///
/// Invariants:
/// - `initial_state_set` implies `located_relay` is `Some`
/// - `previous_source` is `Some` only once `initial_state_set` is true
///
/// Fields are private so the invariants can only be broken through the
/// transition methods below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    located_relay: Option<RelaySlotId>,
    initial_state_set: bool,
    previous_source: Option<BusValue>,
    source_warning: WarningLatch,
}

impl ControllerState {
    /// Fresh state: nothing located, nothing written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The located relay, if discovery has succeeded.
    #[must_use]
    pub fn located_relay(&self) -> Option<RelaySlotId> {
        self.located_relay
    }

    /// Whether the first relay write has been performed.
    #[must_use]
    pub fn initial_state_set(&self) -> bool {
        self.initial_state_set
    }

    /// Last observed raw AC source value.
    #[must_use]
    pub fn previous_source(&self) -> Option<&BusValue> {
        self.previous_source.as_ref()
    }

    /// Relay to drive, once both discovery and the initial write are done.
    #[must_use]
    pub fn monitored_relay(&self) -> Option<RelaySlotId> {
        if self.initial_state_set {
            self.located_relay
        } else {
            None
        }
    }

    /// Record the located relay. Discovery only ever happens once, later calls
    /// keep the first relay.
    pub fn locate(&mut self, slot: RelaySlotId) {
        if self.located_relay.is_none() {
            self.located_relay = Some(slot);
        }
    }

    /// Record the initial source value and mark the initial state as set.
    ///
    /// Returns `false` (and changes nothing) when no relay is located.
    pub fn mark_initialized(&mut self, source: BusValue) -> bool {
        if self.located_relay.is_none() {
            return false;
        }
        self.previous_source = Some(source);
        self.initial_state_set = true;
        true
    }

    /// Record a newly observed source value. Returns `true` when it differs
    /// from the previous one (the baseline always advances).
    pub fn observe_source(&mut self, source: &BusValue) -> bool {
        let changed = self.previous_source.as_ref() != Some(source);
        if self.initial_state_set && changed {
            self.previous_source = Some(source.clone());
        }
        changed
    }

    /// Warning latch for AC source unavailability.
    pub fn source_warning_mut(&mut self) -> &mut WarningLatch {
        &mut self.source_warning
    }

    /// Whether an AC source unavailability episode is in progress.
    #[must_use]
    pub fn source_warning_active(&self) -> bool {
        self.source_warning.is_active()
    }
}
