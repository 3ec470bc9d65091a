//! Relay locator — finds the water heater relay by its label.
//!
//! Slots are probed in ascending order and the first one whose label is a
//! target label wins. Unreadable slots count as "no match": on a cold boot the
//! settings service may not be up yet, so those failures stay quiet.

use whrelay_domain::bus::BusLayout;
use whrelay_domain::relay::{RelaySlotId, TargetLabels};

use crate::ports::BusRegistry;
use crate::registry::RegistryAccess;

/// Scans relay slots for a target label.
#[derive(Debug, Clone)]
pub struct RelayLocator {
    target_labels: TargetLabels,
    max_slots: u32,
}

impl RelayLocator {
    /// Create a locator probing slots `0..max_slots`.
    #[must_use]
    pub fn new(target_labels: TargetLabels, max_slots: u32) -> Self {
        Self {
            target_labels,
            max_slots,
        }
    }

    /// Run one full scan. Returns the lowest slot carrying a target label.
    pub async fn locate<R: BusRegistry>(
        &self,
        access: &RegistryAccess<R>,
        layout: &BusLayout,
    ) -> Option<RelaySlotId> {
        tracing::info!(
            labels = %self.target_labels,
            max_slots = self.max_slots,
            "looking for water heater relay"
        );

        for slot in RelaySlotId::range(self.max_slots) {
            let path = layout.custom_name_path(slot);
            let Some(value) = access.read_value(&layout.settings_service, &path).await else {
                continue;
            };
            let Some(label) = value.as_text() else {
                tracing::debug!(%slot, %value, "relay label is not text");
                continue;
            };
            if self.target_labels.contains(label) {
                tracing::info!(%slot, label, "found water heater relay");
                return Some(slot);
            }
        }

        tracing::info!("water heater relay not found yet, will retry");
        None
    }
}
