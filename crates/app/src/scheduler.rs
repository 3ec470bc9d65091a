//! Single-threaded scheduler sequencing the locate, initialize, and monitor
//! steps.
//!
//! ```text
//!   ┌────────┐ relay found ┌────────────┐ first write ┌─────────┐
//!   │ Locate │────────────▶│ Initialize │────────────▶│ Monitor │──┐
//!   └────────┘             └────────────┘             └─────────┘  │
//!     ▲    │ not found       ▲     │ source unreadable   ▲         │ every tick
//!     └────┘                 └─────┘                     └─────────┘
//! ```
//!
//! Each step owns a timer with an explicit `armed` flag. Only one timer is
//! armed at a time: a step that finishes disarms itself and arms its
//! successor. A timer fires one interval after it is armed and, while armed,
//! one interval after its previous run completed.

use std::fmt;

use tokio::time::{Duration, Instant};

use crate::config::Intervals;
use crate::controller::{InitReport, WaterHeaterController};
use crate::ports::BusRegistry;

/// The three steps, in hand-off order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Locate,
    Initialize,
    Monitor,
}

impl Step {
    const ALL: [Self; 3] = [Self::Locate, Self::Initialize, Self::Monitor];

    const fn index(self) -> usize {
        match self {
            Self::Locate => 0,
            Self::Initialize => 1,
            Self::Monitor => 2,
        }
    }

    /// The step armed once this one is done.
    const fn successor(self) -> Option<Self> {
        match self {
            Self::Locate => Some(Self::Initialize),
            Self::Initialize => Some(Self::Monitor),
            Self::Monitor => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locate => f.write_str("locate"),
            Self::Initialize => f.write_str("initialize"),
            Self::Monitor => f.write_str("monitor"),
        }
    }
}

/// What a step asks of its timer after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Run again after one interval.
    Continue,
    /// Disarm for good and hand off to the next step.
    Done,
}

/// Due offset used when an interval does not fit in an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct Timer {
    interval: Duration,
    armed: bool,
    due: Instant,
}

impl Timer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: false,
            due: Instant::now(),
        }
    }

    fn arm(&mut self) {
        let now = Instant::now();
        self.armed = true;
        self.due = now
            .checked_add(self.interval)
            .unwrap_or_else(|| now + FAR_FUTURE);
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

/// Owns the controller and the three step timers.
pub struct Scheduler<R> {
    controller: WaterHeaterController<R>,
    timers: [Timer; 3],
}

impl<R: BusRegistry> Scheduler<R> {
    /// Create a scheduler with only the locate timer armed.
    pub fn new(controller: WaterHeaterController<R>, intervals: Intervals) -> Self {
        let mut timers = [
            Timer::new(intervals.discovery),
            Timer::new(intervals.initialize),
            Timer::new(intervals.monitor),
        ];
        timers[Step::Locate.index()].arm();
        Self { controller, timers }
    }

    /// The controller driven by this scheduler.
    pub fn controller(&self) -> &WaterHeaterController<R> {
        &self.controller
    }

    /// Whether the timer of `step` is armed.
    #[must_use]
    pub fn is_armed(&self, step: Step) -> bool {
        self.timers[step.index()].armed
    }

    /// The armed step that fires next.
    #[must_use]
    pub fn next_step(&self) -> Option<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| self.timers[step.index()].armed)
            .min_by_key(|step| self.timers[step.index()].due)
    }

    /// Run forever. Returns only if no timer is armed.
    pub async fn run(mut self) {
        while self.tick_next().await.is_some() {}
        tracing::warn!("no step armed, scheduler stopped");
    }

    /// Wait for the next armed timer, run its step, and re-arm or hand off.
    ///
    /// Returns the step that ran, or `None` when nothing is armed.
    pub async fn tick_next(&mut self) -> Option<Step> {
        let step = self.next_step()?;
        tokio::time::sleep_until(self.timers[step.index()].due).await;

        match self.run_step(step).await {
            Tick::Continue => self.timers[step.index()].arm(),
            Tick::Done => {
                self.timers[step.index()].disarm();
                if let Some(next) = step.successor() {
                    tracing::debug!(from = %step, to = %next, "handing off");
                    self.timers[next.index()].arm();
                }
            }
        }
        Some(step)
    }

    async fn run_step(&mut self, step: Step) -> Tick {
        match step {
            Step::Locate => match self.controller.locate_relay().await {
                Some(_) => Tick::Done,
                None => Tick::Continue,
            },
            Step::Initialize => match self.controller.initialize().await {
                InitReport::Skipped | InitReport::Applied(_) => Tick::Done,
                InitReport::SourceUnavailable { .. } => Tick::Continue,
            },
            Step::Monitor => {
                self.controller.monitor().await;
                Tick::Continue
            }
        }
    }
}
