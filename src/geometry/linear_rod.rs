//! Straight threaded rod geometry.

use core::f64::consts::PI;

use libm::tan;

use crate::config::units::{Microsteps, Seconds};
use crate::config::LinearRodConfig;
use crate::error::Result;

use super::MountGeometry;

/// Linear-rod mount with constants derived once from configuration.
///
/// The rod turns at a constant rate, so the position target grows linearly
/// with elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearRod {
    /// Microsteps for one full turn of the threaded rod (gear ratio applied).
    pub usteps_per_rod_rotation: f64,

    /// Millimetres the rod must advance per second to follow the sky.
    pub mm_lift_per_second: f64,

    /// Microsteps per second matching the sidereal rate.
    pub usteps_per_second: f64,

    sidereal_seconds: Seconds,
}

impl LinearRod {
    /// Derive tracking constants from configuration.
    pub fn from_config(config: &LinearRodConfig) -> Self {
        let gear_ratio = config.rod_gear_teeth as f64 / config.motor_gear_teeth as f64;
        let usteps_per_rod_rotation =
            360.0 / config.step_angle_deg * config.microsteps_per_step as f64 * gear_ratio;

        // Earth's rotation per second, in radians.
        let radians_per_second = 2.0 * PI / config.sidereal_seconds.0;
        let mm_lift_per_second = tan(radians_per_second) * config.base_length_mm;

        let usteps_per_second =
            mm_lift_per_second / config.thread_pitch_mm * usteps_per_rod_rotation;

        Self {
            usteps_per_rod_rotation,
            mm_lift_per_second,
            usteps_per_second,
            sidereal_seconds: config.sidereal_seconds,
        }
    }
}

impl MountGeometry for LinearRod {
    #[inline]
    fn sidereal_seconds(&self) -> Seconds {
        self.sidereal_seconds
    }

    #[inline]
    fn time_to_position(&self, elapsed: Seconds) -> f64 {
        self.usteps_per_second * elapsed.0
    }

    #[inline]
    fn microsteps_to_time(&self, microsteps: Microsteps) -> Result<Seconds> {
        Ok(Seconds(microsteps.0 as f64 / self.usteps_per_second))
    }

    #[inline]
    fn max_microsteps(&self) -> Option<f64> {
        None
    }

    #[inline]
    fn tracking_rate_at(&self, _elapsed: Seconds) -> f64 {
        self.usteps_per_second
    }
}
