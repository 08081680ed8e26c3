//! Isosceles curved rod geometry.

use core::f64::consts::PI;

use libm::{asin, cos, sin};

use crate::config::units::{Microsteps, Seconds};
use crate::config::CurvedRodConfig;
use crate::error::{GeometryError, Result};

use super::MountGeometry;

/// Isosceles mount whose rod length follows `2 * base * sin(theta / 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurvedRod {
    /// Microsteps for one full turn of the rod.
    pub usteps_per_rotation: f64,

    /// Microsteps at the peak of the sine, i.e. the mechanical reach.
    pub amplitude: f64,

    sidereal_seconds: Seconds,
}

impl CurvedRod {
    /// Derive tracking constants from configuration.
    pub fn from_config(config: &CurvedRodConfig) -> Self {
        let usteps_per_rotation =
            360.0 / config.step_angle_deg * config.microsteps_per_step as f64;
        let amplitude =
            usteps_per_rotation * config.threads_per_cm * 2.0 * config.base_length_cm;

        Self {
            usteps_per_rotation,
            amplitude,
            sidereal_seconds: config.sidereal_seconds,
        }
    }

    #[inline]
    fn phase(&self, elapsed: Seconds) -> f64 {
        elapsed.0 * PI / self.sidereal_seconds.0
    }
}

impl MountGeometry for CurvedRod {
    #[inline]
    fn sidereal_seconds(&self) -> Seconds {
        self.sidereal_seconds
    }

    #[inline]
    fn time_to_position(&self, elapsed: Seconds) -> f64 {
        self.amplitude * sin(self.phase(elapsed))
    }

    fn microsteps_to_time(&self, microsteps: Microsteps) -> Result<Seconds> {
        let ratio = microsteps.0 as f64 / self.amplitude;
        // asin is undefined here; the position cannot be reached by this mount.
        if !(-1.0..=1.0).contains(&ratio) {
            return Err(GeometryError::Unreachable {
                microsteps: microsteps.0,
                max: self.amplitude,
            }
            .into());
        }

        Ok(Seconds(asin(ratio) * self.sidereal_seconds.0 / PI))
    }

    #[inline]
    fn max_microsteps(&self) -> Option<f64> {
        Some(self.amplitude)
    }

    #[inline]
    fn tracking_rate_at(&self, elapsed: Seconds) -> f64 {
        self.amplitude * PI / self.sidereal_seconds.0 * cos(self.phase(elapsed))
    }
}
