//! Stepper driver configuration from TOML.

use serde::Deserialize;

use crate::driver::{CurrentLimit, PwmCurrentModel};

use super::units::Stepping;

/// Driver settings applied at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Microstep resolution (1, 2, 4 or 8).
    #[serde(default)]
    pub stepping: Stepping,

    /// Current limit. Falls back to the coarse mid-level when absent.
    #[serde(default)]
    pub current: Option<CurrentLimit>,

    /// Conversion from continuous current to PWM duty.
    #[serde(default)]
    pub pwm: PwmCurrentModel,
}
