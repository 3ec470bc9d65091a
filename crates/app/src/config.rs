//! Controller configuration — what to look for, where, and how often.

use std::time::Duration;

use whrelay_domain::bus::BusLayout;
use whrelay_domain::error::ValidationError;
use whrelay_domain::relay::TargetLabels;

/// Longest accepted step interval.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Timer intervals of the three steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Between two discovery scans.
    pub discovery: Duration,
    /// Between two attempts at the initial relay write.
    pub initialize: Duration,
    /// Between two AC source checks.
    pub monitor: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            discovery: Duration::from_secs(5),
            initialize: Duration::from_secs(1),
            monitor: Duration::from_secs(5),
        }
    }
}

impl Intervals {
    fn validate(&self) -> Result<(), ValidationError> {
        for (name, interval) in [
            ("discovery", self.discovery),
            ("initialize", self.initialize),
            ("monitor", self.monitor),
        ] {
            if interval.is_zero() {
                return Err(ValidationError::ZeroInterval { name });
            }
            if interval > MAX_INTERVAL {
                return Err(ValidationError::IntervalTooLong {
                    name,
                    max_secs: MAX_INTERVAL.as_secs(),
                });
            }
        }
        Ok(())
    }
}

/// Static controller configuration, loaded once at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Labels identifying the water heater relay.
    pub target_labels: TargetLabels,
    /// Number of relay slots probed during discovery (`0..max_slots`).
    pub max_slots: u32,
    /// Step intervals.
    pub intervals: Intervals,
    /// Service names and object paths.
    pub layout: BusLayout,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_labels: TargetLabels::default(),
            max_slots: 10,
            intervals: Intervals::default(),
            layout: BusLayout::default(),
        }
    }
}

impl ControllerConfig {
    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when no slot would be probed, an
    /// interval is zero or longer than [`MAX_INTERVAL`], or a layout field is
    /// empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_slots == 0 {
            return Err(ValidationError::ZeroSlots);
        }
        self.intervals.validate()?;
        self.layout.validate()
    }
}
