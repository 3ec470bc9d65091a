//! Active AC input source — classification of the raw source code and the
//! relay command derived from it.
//!
//! | Code | Source |
//! |------|--------|
//! | `0` | Unavailable |
//! | `1` | Grid |
//! | `2` | Generator |
//! | `3`, `4` | Shore |
//! | `240` | Inverting |
//! | anything else | Unknown (raw code kept) |
//! | not an integer | Unknown (no code) |
//!
//! Only grid and shore power allow the water heater to run. New or unknown
//! codes switch the relay off.

use std::fmt;

use crate::bus::BusValue;
use crate::relay::RelayState;

/// Category of the active AC input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcSource {
    Unavailable,
    Grid,
    Generator,
    Shore,
    Inverting,
    /// A code this system does not know, kept for diagnostics. `None` when
    /// the published value is not an integer at all.
    Unknown(Option<i64>),
}

impl AcSource {
    /// Classify a raw source code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Unavailable,
            1 => Self::Grid,
            2 => Self::Generator,
            3 | 4 => Self::Shore,
            240 => Self::Inverting,
            other => Self::Unknown(Some(other)),
        }
    }

    /// Classify a value read from the bus. Anything without an integer code
    /// (no value, text, fractional number) is unknown.
    #[must_use]
    pub fn from_value(value: &BusValue) -> Self {
        value.as_int().map_or(Self::Unknown(None), Self::from_code)
    }

    /// Whether the boat is on utility or shore power.
    #[must_use]
    pub const fn is_utility_power(self) -> bool {
        matches!(self, Self::Grid | Self::Shore)
    }

    /// Relay command for this source.
    #[must_use]
    pub const fn relay_state(self) -> RelayState {
        if self.is_utility_power() {
            RelayState::On
        } else {
            RelayState::Off
        }
    }
}

impl From<i64> for AcSource {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for AcSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("Unavailable"),
            Self::Grid => f.write_str("Grid"),
            Self::Generator => f.write_str("Generator"),
            Self::Shore => f.write_str("Shore"),
            Self::Inverting => f.write_str("Inverting"),
            Self::Unknown(Some(code)) => write!(f, "Unknown ({code})"),
            Self::Unknown(None) => f.write_str("Unknown (no code)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: [i64; 6] = [0, 1, 2, 3, 4, 240];

    #[test]
    fn should_classify_known_codes() {
        assert_eq!(AcSource::from_code(0), AcSource::Unavailable);
        assert_eq!(AcSource::from_code(1), AcSource::Grid);
        assert_eq!(AcSource::from_code(2), AcSource::Generator);
        assert_eq!(AcSource::from_code(3), AcSource::Shore);
        assert_eq!(AcSource::from_code(4), AcSource::Shore);
        assert_eq!(AcSource::from_code(240), AcSource::Inverting);
    }

    #[test]
    fn should_classify_every_other_code_as_unknown_and_turn_off() {
        let samples = (-300..=300)
            .chain([i64::MIN, i64::MAX, 239, 241, 255, 65_535])
            .filter(|code| !KNOWN_CODES.contains(code));

        for code in samples {
            let source = AcSource::from_code(code);
            assert_eq!(source, AcSource::Unknown(Some(code)));
            assert_eq!(source.relay_state(), RelayState::Off, "code {code}");
        }
    }

    #[test]
    fn should_turn_on_only_for_grid_and_shore_codes() {
        for code in -10..=300 {
            let expected = if matches!(code, 1 | 3 | 4) {
                RelayState::On
            } else {
                RelayState::Off
            };
            assert_eq!(AcSource::from_code(code).relay_state(), expected, "code {code}");
        }
    }

    #[test]
    fn should_treat_generator_and_inverter_as_not_utility_power() {
        assert!(!AcSource::Generator.is_utility_power());
        assert!(!AcSource::Inverting.is_utility_power());
        assert!(!AcSource::Unavailable.is_utility_power());
    }

    #[test]
    fn should_display_category_names() {
        assert_eq!(AcSource::Grid.to_string(), "Grid");
        assert_eq!(AcSource::Shore.to_string(), "Shore");
        assert_eq!(AcSource::Inverting.to_string(), "Inverting");
    }

    #[test]
    fn should_display_raw_code_for_unknown_source() {
        assert_eq!(AcSource::from_code(7).to_string(), "Unknown (7)");
    }

    #[test]
    fn should_classify_non_integer_values_as_unknown_and_turn_off() {
        for value in [
            BusValue::Invalid,
            BusValue::from("grid"),
            BusValue::Float(1.5),
        ] {
            let source = AcSource::from_value(&value);
            assert_eq!(source, AcSource::Unknown(None), "value {value}");
            assert_eq!(source.relay_state(), RelayState::Off);
        }
        assert_eq!(AcSource::Unknown(None).to_string(), "Unknown (no code)");
    }

    #[test]
    fn should_classify_integer_values_by_code() {
        assert_eq!(AcSource::from_value(&BusValue::Int(3)), AcSource::Shore);
        assert_eq!(AcSource::from_value(&BusValue::Float(1.0)), AcSource::Grid);
    }

    #[test]
    fn should_convert_from_raw_code() {
        let source: AcSource = 3.into();
        assert_eq!(source, AcSource::Shore);
    }
}
