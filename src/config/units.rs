//! Unit types for physical quantities.
//!
//! Keeps angles, tracking time, motor positions and currents apart at compile time.

use serde::Deserialize;

use crate::error::ConfigError;

/// Angle in degrees, measured from the fully-closed position.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Elapsed tracking time in seconds since the fully-closed position.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Seconds(pub f64);

/// Absolute motor position in microsteps from the fully-closed origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(pub i64);

impl Microsteps {
    /// Truncate a continuous position toward zero.
    #[inline]
    pub fn from_position(position: f64) -> Self {
        Self(position as i64)
    }
}

/// Motor current in amperes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Amps(pub f32);

/// Microstep resolution selectable on the MS1/MS2 lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stepping {
    /// Full step.
    Full,
    /// Half step.
    Half,
    /// Quarter step.
    Quarter,
    /// Eighth step (finest resolution).
    #[default]
    Eighth,
}

impl Stepping {
    /// Microsteps per full motor step.
    #[inline]
    pub const fn divisor(self) -> u16 {
        match self {
            Stepping::Full => 1,
            Stepping::Half => 2,
            Stepping::Quarter => 4,
            Stepping::Eighth => 8,
        }
    }

    /// Logic levels for (MS1, MS2), `true` meaning high.
    #[inline]
    pub const fn select_lines(self) -> (bool, bool) {
        match self {
            Stepping::Full => (false, false),
            Stepping::Half => (true, false),
            Stepping::Quarter => (false, true),
            Stepping::Eighth => (true, true),
        }
    }
}

impl TryFrom<u16> for Stepping {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Stepping::Full),
            2 => Ok(Stepping::Half),
            4 => Ok(Stepping::Quarter),
            8 => Ok(Stepping::Eighth),
            other => Err(ConfigError::InvalidStepping(other)),
        }
    }
}

impl<'de> Deserialize<'de> for Stepping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Stepping::try_from(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
