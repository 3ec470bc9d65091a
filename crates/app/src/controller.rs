//! Water heater controller — the locate, initialize, and monitor steps.
//!
//! Each step runs to completion against the single [`ControllerState`] and
//! reports what it did. The [`Scheduler`](crate::scheduler::Scheduler) turns
//! those reports into timer decisions.

use whrelay_domain::ac_source::AcSource;
use whrelay_domain::bus::{BusLayout, BusValue};
use whrelay_domain::relay::{RelaySlotId, RelayState};
use whrelay_domain::state::ControllerState;

use crate::config::ControllerConfig;
use crate::locator::RelayLocator;
use crate::ports::BusRegistry;
use crate::registry::RegistryAccess;

/// A relay write triggered by an AC source reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Raw source value that was read.
    pub reading: BusValue,
    /// Its classification.
    pub source: AcSource,
    /// Relay state that was written.
    pub state: RelayState,
    /// Whether the registry accepted the write.
    pub written: bool,
    /// Whether this reading ended an unavailability episode.
    pub recovered: bool,
}

/// Outcome of one initialize step.
#[derive(Debug, Clone, PartialEq)]
pub enum InitReport {
    /// Nothing to do: no relay located, or the initial state is already set.
    Skipped,
    /// The AC source could not be read; `warned` is set on the first failure
    /// of an episode.
    SourceUnavailable { warned: bool },
    /// The initial relay state was written.
    Applied(Applied),
}

/// Outcome of one monitor step.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorReport {
    /// Not initialized yet.
    Idle,
    /// The AC source could not be read; the relay was left alone.
    SourceUnavailable { warned: bool },
    /// Same value as last time; nothing written.
    Unchanged { recovered: bool },
    /// The value changed and the relay was written.
    Applied(Applied),
}

/// Drives the water heater relay from the active AC input source.
pub struct WaterHeaterController<R> {
    access: RegistryAccess<R>,
    locator: RelayLocator,
    layout: BusLayout,
    state: ControllerState,
}

impl<R: BusRegistry> WaterHeaterController<R> {
    /// Create a controller with fresh state.
    pub fn new(registry: R, config: &ControllerConfig) -> Self {
        Self {
            access: RegistryAccess::new(registry),
            locator: RelayLocator::new(config.target_labels.clone(), config.max_slots),
            layout: config.layout.clone(),
            state: ControllerState::new(),
        }
    }

    /// Current controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The registry adapter.
    pub fn registry(&self) -> &R {
        self.access.inner()
    }

    /// Locate step. Scans once unless a relay was already located.
    pub async fn locate_relay(&mut self) -> Option<RelaySlotId> {
        if let Some(slot) = self.state.located_relay() {
            return Some(slot);
        }
        let slot = self.locator.locate(&self.access, &self.layout).await?;
        self.state.locate(slot);
        Some(slot)
    }

    /// Initialize step: write the first relay state from the current source.
    ///
    /// The initial state counts as set once a readable source produced a write
    /// attempt, even if the registry refused the write.
    pub async fn initialize(&mut self) -> InitReport {
        if self.state.initial_state_set() {
            return InitReport::Skipped;
        }
        let Some(slot) = self.state.located_relay() else {
            return InitReport::Skipped;
        };

        let Some(reading) = self.read_source().await else {
            let warned = self.state.source_warning_mut().raise();
            if warned {
                tracing::warn!("AC input source not available for initial state, retrying");
            }
            return InitReport::SourceUnavailable { warned };
        };

        let recovered = self.state.source_warning_mut().clear();
        if recovered {
            tracing::info!("AC input source available again for initial state");
        }

        let source = AcSource::from_value(&reading);
        tracing::info!(%source, value = %reading, "initial AC input source");
        let (state, written) = self.drive(slot, source).await;
        self.state.mark_initialized(reading.clone());

        InitReport::Applied(Applied {
            reading,
            source,
            state,
            written,
            recovered,
        })
    }

    /// Monitor step: rewrite the relay whenever the raw source value changes.
    ///
    /// The baseline advances to every readable value, whether or not the
    /// following write succeeds.
    pub async fn monitor(&mut self) -> MonitorReport {
        let Some(slot) = self.state.monitored_relay() else {
            return MonitorReport::Idle;
        };

        let Some(reading) = self.read_source().await else {
            let warned = self.state.source_warning_mut().raise();
            if warned {
                tracing::warn!("could not read AC input source, retrying");
            }
            return MonitorReport::SourceUnavailable { warned };
        };

        let recovered = self.state.source_warning_mut().clear();
        if recovered {
            tracing::info!("AC input source available again");
        }

        if !self.state.observe_source(&reading) {
            return MonitorReport::Unchanged { recovered };
        }

        let source = AcSource::from_value(&reading);
        tracing::info!(%source, value = %reading, "AC input source changed");
        let (state, written) = self.drive(slot, source).await;

        MonitorReport::Applied(Applied {
            reading,
            source,
            state,
            written,
            recovered,
        })
    }

    /// `None` only when the registry could not be read. A value that is not
    /// a source code is still a reading.
    async fn read_source(&self) -> Option<BusValue> {
        self.access
            .read_value(&self.layout.system_service, &self.layout.ac_source_path)
            .await
    }

    async fn drive(&self, slot: RelaySlotId, source: AcSource) -> (RelayState, bool) {
        let state = source.relay_state();
        let path = self.layout.relay_state_path(slot);
        let written = self
            .access
            .write_value(
                &self.layout.system_service,
                &path,
                BusValue::Int(state.bus_value()),
            )
            .await;
        if written {
            tracing::info!(%slot, %state, path = %path, "water heater relay set");
        }
        (state, written)
    }
}
