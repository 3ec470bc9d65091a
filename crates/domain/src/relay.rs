//! Relay slots, relay states, and the labels that identify the target relay.

use std::fmt;

use crate::error::ValidationError;

/// Identifier of a relay slot (`0`, `1`, …) as numbered by the registries.
///
/// The slot itself (label, state) is owned by the registries; this system only
/// refers to it by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelaySlotId(u32);

impl RelaySlotId {
    /// Wrap a raw slot number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Access the raw slot number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Iterate slot ids `0..max_slots` in ascending order.
    pub fn range(max_slots: u32) -> impl Iterator<Item = Self> {
        (0..max_slots).map(Self)
    }
}

impl fmt::Display for RelaySlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Commanded state of a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

impl RelayState {
    /// Value written to the relay's `State` object.
    #[must_use]
    pub const fn bus_value(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

/// Labels that mark a relay as the water heater relay.
///
/// Matching is exact and case-sensitive. Duplicates are dropped, the first
/// occurrence keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLabels(Vec<String>);

impl TargetLabels {
    /// Build a label set, rejecting empty sets and blank labels.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTargetLabels`] or
    /// [`ValidationError::BlankTargetLabel`].
    pub fn new<I, S>(labels: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(ValidationError::BlankTargetLabel);
            }
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        if unique.is_empty() {
            return Err(ValidationError::EmptyTargetLabels);
        }
        Ok(Self(unique))
    }

    /// Whether `label` is one of the target labels.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    /// The labels, in configuration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for TargetLabels {
    fn default() -> Self {
        Self(vec!["AC Water Heater".to_string(), "AC WH".to_string()])
    }
}

impl fmt::Display for TargetLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label:?}")?;
        }
        f.write_str("]")
    }
}
