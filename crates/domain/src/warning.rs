//! Episode-based warning suppression.
//!
//! A warning is logged once when a value becomes unreadable and stays quiet
//! until the value is readable again, at which point a single recovery note is
//! logged. The latch only tracks the transitions; callers do the logging.

/// Two-state latch toggled by failure-after-success and success-after-failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarningLatch {
    /// No unavailability episode in progress.
    #[default]
    Quiet,
    /// A warning was emitted for the current episode.
    Active,
}

impl WarningLatch {
    /// Record a failure. Returns `true` when this failure starts a new episode
    /// and should be reported.
    pub fn raise(&mut self) -> bool {
        let started = *self == Self::Quiet;
        *self = Self::Active;
        started
    }

    /// Record a success. Returns `true` when this success ends an episode and
    /// a recovery should be reported.
    pub fn clear(&mut self) -> bool {
        let recovered = *self == Self::Active;
        *self = Self::Quiet;
        recovered
    }

    /// Whether an episode is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_quiet() {
        assert!(!WarningLatch::default().is_active());
    }

    #[test]
    fn should_report_only_first_failure_of_an_episode() {
        let mut latch = WarningLatch::default();
        assert!(latch.raise());
        assert!(!latch.raise());
        assert!(!latch.raise());
        assert!(latch.is_active());
    }

    #[test]
    fn should_report_recovery_once_per_episode() {
        let mut latch = WarningLatch::default();
        latch.raise();
        latch.raise();
        assert!(latch.clear());
        assert!(!latch.clear());
        assert!(!latch.is_active());
    }

    #[test]
    fn should_not_report_recovery_without_prior_failure() {
        let mut latch = WarningLatch::default();
        assert!(!latch.clear());
    }

    #[test]
    fn should_count_one_warning_and_one_recovery_per_episode() {
        // ok, fail x3, ok x2, fail, ok
        let readings = [true, false, false, false, true, true, false, true];
        let mut latch = WarningLatch::default();
        let mut warnings = 0;
        let mut recoveries = 0;
        for readable in readings {
            if readable {
                recoveries += usize::from(latch.clear());
            } else {
                warnings += usize::from(latch.raise());
            }
        }
        assert_eq!(warnings, 2);
        assert_eq!(recoveries, 2);
    }
}
