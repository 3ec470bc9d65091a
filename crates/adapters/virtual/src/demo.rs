//! Demo layout — a few labelled relays and an AC source on grid power.

use whrelay_domain::bus::{BusLayout, BusValue};
use whrelay_domain::relay::{RelaySlotId, RelayState};

use crate::VirtualRegistry;

/// Relay labels of the demo boat, by slot.
pub const DEMO_RELAYS: [&str; 3] = ["Bilge Pump", "AC Water Heater", "Cabin Lights"];

/// AC source code of the demo boat (grid).
pub const DEMO_AC_SOURCE: i64 = 1;

impl VirtualRegistry {
    /// A registry with the [`DEMO_RELAYS`], all off, and the AC source set to
    /// [`DEMO_AC_SOURCE`].
    #[must_use]
    pub fn demo(layout: &BusLayout) -> Self {
        let registry = Self::new(layout.clone());
        for (slot, label) in (0..).map(RelaySlotId::new).zip(DEMO_RELAYS) {
            registry.add_relay(slot, label, RelayState::Off);
        }
        registry.set_ac_source(Some(DEMO_AC_SOURCE));
        registry
    }

    /// Add a relay: its label in the settings service and its state in the
    /// system service.
    pub fn add_relay(&self, slot: RelaySlotId, label: &str, state: RelayState) {
        let layout = self.layout();
        self.set(
            &layout.settings_service,
            &layout.custom_name_path(slot),
            BusValue::from(label),
        );
        self.set(
            &layout.system_service,
            &layout.relay_state_path(slot),
            BusValue::Int(state.bus_value()),
        );
    }

    /// Set the AC source code, or `None` for "no value" (`Invalid`).
    pub fn set_ac_source(&self, code: Option<i64>) {
        let layout = self.layout();
        let value = code.map_or(BusValue::Invalid, BusValue::Int);
        self.set(&layout.system_service, &layout.ac_source_path, value);
    }

    /// Current state of a relay, if it exists and holds 0 or 1.
    #[must_use]
    pub fn relay_state(&self, slot: RelaySlotId) -> Option<RelayState> {
        let layout = self.layout();
        match self
            .get(&layout.system_service, &layout.relay_state_path(slot))?
            .as_int()?
        {
            0 => Some(RelayState::Off),
            1 => Some(RelayState::On),
            _ => None,
        }
    }
}
