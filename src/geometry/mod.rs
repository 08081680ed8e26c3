//! Geometry module for barndoor-tracker.
//!
//! Maps elapsed tracking time and hinge angle to absolute microstep targets,
//! and back, for each supported mount geometry. All positions are measured from
//! the fully-closed origin (0 seconds, 0 degrees, 0 microsteps).

mod converter;
mod curved_rod;
mod linear_rod;

pub use converter::GeometryConverter;
pub use curved_rod::CurvedRod;
pub use linear_rod::LinearRod;

use crate::config::units::{Degrees, Microsteps, Seconds};
use crate::config::MountConfig;
use crate::error::Result;

/// Conversion contract shared by every mount geometry.
pub trait MountGeometry {
    /// Duration of one sidereal rotation.
    fn sidereal_seconds(&self) -> Seconds;

    /// Untruncated motor position after `elapsed` seconds of tracking.
    fn time_to_position(&self, elapsed: Seconds) -> f64;

    /// Target microstep count after `elapsed` seconds of tracking.
    ///
    /// Truncates toward zero.
    #[inline]
    fn time_to_microsteps(&self, elapsed: Seconds) -> Microsteps {
        Microsteps::from_position(self.time_to_position(elapsed))
    }

    /// Elapsed tracking time that corresponds to a microstep count.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unreachable` if the mount cannot reach the position.
    fn microsteps_to_time(&self, microsteps: Microsteps) -> Result<Seconds>;

    /// Largest reachable microstep magnitude, if the mechanism is bounded.
    fn max_microsteps(&self) -> Option<f64>;

    /// Instantaneous tracking speed in microsteps per second.
    fn tracking_rate_at(&self, elapsed: Seconds) -> f64;

    /// Tracking time needed for the sky to turn by `angle`.
    #[inline]
    fn angle_to_time(&self, angle: Degrees) -> Seconds {
        Seconds(self.sidereal_seconds().0 / 360.0 * angle.0)
    }

    /// Sky rotation accumulated over `elapsed`.
    #[inline]
    fn time_to_angle(&self, elapsed: Seconds) -> Degrees {
        Degrees(elapsed.0 * 360.0 / self.sidereal_seconds().0)
    }
}

/// The active mount geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mount {
    /// Straight rod, linear in time.
    LinearRod(LinearRod),
    /// Isosceles curved rod, sinusoidal in time.
    CurvedRod(CurvedRod),
}

impl Mount {
    /// Build the geometry model described by a mount configuration.
    pub fn from_config(config: &MountConfig) -> Self {
        match config {
            MountConfig::LinearRod(c) => Mount::LinearRod(LinearRod::from_config(c)),
            MountConfig::CurvedRod(c) => Mount::CurvedRod(CurvedRod::from_config(c)),
        }
    }
}

impl From<LinearRod> for Mount {
    fn from(rod: LinearRod) -> Self {
        Mount::LinearRod(rod)
    }
}

impl From<CurvedRod> for Mount {
    fn from(rod: CurvedRod) -> Self {
        Mount::CurvedRod(rod)
    }
}

impl MountGeometry for Mount {
    fn sidereal_seconds(&self) -> Seconds {
        match self {
            Mount::LinearRod(m) => m.sidereal_seconds(),
            Mount::CurvedRod(m) => m.sidereal_seconds(),
        }
    }

    fn time_to_position(&self, elapsed: Seconds) -> f64 {
        match self {
            Mount::LinearRod(m) => m.time_to_position(elapsed),
            Mount::CurvedRod(m) => m.time_to_position(elapsed),
        }
    }

    fn microsteps_to_time(&self, microsteps: Microsteps) -> Result<Seconds> {
        match self {
            Mount::LinearRod(m) => m.microsteps_to_time(microsteps),
            Mount::CurvedRod(m) => m.microsteps_to_time(microsteps),
        }
    }

    fn max_microsteps(&self) -> Option<f64> {
        match self {
            Mount::LinearRod(m) => m.max_microsteps(),
            Mount::CurvedRod(m) => m.max_microsteps(),
        }
    }

    fn tracking_rate_at(&self, elapsed: Seconds) -> f64 {
        match self {
            Mount::LinearRod(m) => m.tracking_rate_at(elapsed),
            Mount::CurvedRod(m) => m.tracking_rate_at(elapsed),
        }
    }
}
