//! Current limit selection for the MP6500.

use libm::ceilf;
use serde::Deserialize;

use crate::config::units::Amps;

use super::pins::ReferenceLevel;

/// Discrete current levels selected by the I1/I2 reference lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum CoarseCurrentLimit {
    /// 0.5 A
    PointFive,
    /// 1.0 A
    One,
    /// 1.5 A
    OnePointFive,
    /// 2.0 A
    Two,
}

/// Coarse level applied by `init` when no current limit is requested.
pub const DEFAULT_COARSE_CURRENT: CoarseCurrentLimit = CoarseCurrentLimit::One;

impl CoarseCurrentLimit {
    /// Reference line levels for (I1, I2).
    pub const fn reference_levels(self) -> (ReferenceLevel, ReferenceLevel) {
        use ReferenceLevel::{HighImpedance as Z, Low as L};
        match self {
            CoarseCurrentLimit::PointFive => (Z, Z),
            CoarseCurrentLimit::One => (L, Z),
            CoarseCurrentLimit::OnePointFive => (Z, L),
            CoarseCurrentLimit::Two => (L, L),
        }
    }

    /// Nominal output current.
    pub const fn amps(self) -> Amps {
        match self {
            CoarseCurrentLimit::PointFive => Amps(0.5),
            CoarseCurrentLimit::One => Amps(1.0),
            CoarseCurrentLimit::OnePointFive => Amps(1.5),
            CoarseCurrentLimit::Two => Amps(2.0),
        }
    }
}

impl Default for CoarseCurrentLimit {
    fn default() -> Self {
        DEFAULT_COARSE_CURRENT
    }
}

/// Active current limit mode.
///
/// Coarse and continuous modes share the I1/I2 lines and exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum CurrentLimit {
    /// One of four discrete levels.
    Coarse(CoarseCurrentLimit),
    /// PWM-derived reference on I1, I2 held low.
    Continuous(Amps),
}

impl CurrentLimit {
    /// Nominal output current.
    pub fn amps(&self) -> Amps {
        match self {
            CurrentLimit::Coarse(level) => level.amps(),
            CurrentLimit::Continuous(amps) => *amps,
        }
    }
}

/// Linear relation between the requested current and the I1 PWM duty.
///
/// `volts = (offset_volts - amps) / volts_per_amp`, then
/// `duty = ceil(255 / logic_volts * volts)` out of 255.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct PwmCurrentModel {
    /// Reference voltage at zero output current.
    pub offset_volts: f32,
    /// Scaling constant between current and reference voltage.
    pub volts_per_amp: f32,
    /// Logic supply voltage (PWM high level).
    pub logic_volts: f32,
}

impl Default for PwmCurrentModel {
    fn default() -> Self {
        Self {
            offset_volts: 2.2,
            volts_per_amp: 0.63,
            logic_volts: 5.0,
        }
    }
}

impl PwmCurrentModel {
    /// Full-scale duty value.
    pub const DUTY_MAX: u8 = 255;

    /// Average voltage required on I1 for the requested current.
    #[inline]
    pub fn reference_volts(&self, current: Amps) -> f32 {
        (self.offset_volts - current.0) / self.volts_per_amp
    }

    /// 8-bit duty cycle for the requested current, rounded up.
    pub fn duty_for(&self, current: Amps) -> u8 {
        let raw = ceilf(Self::DUTY_MAX as f32 / self.logic_volts * self.reference_volts(current));
        raw.clamp(0.0, Self::DUTY_MAX as f32) as u8
    }
}
