//! Geometry converter: a mount model paired with its operating bounds.

use crate::config::units::{Degrees, Microsteps, Seconds};
use crate::config::{AngleLimits, MountConfig};
use crate::error::{GeometryError, Result};

use super::{Mount, MountGeometry};

/// Bidirectional time/angle to microstep conversion for one mount.
///
/// Stateless apart from its immutable parameters; cheap to copy and safe to
/// share between threads.
///
/// # Example
///
/// ```rust,ignore
/// let converter = config.converter();
/// let target = converter.angle_to_microsteps(Degrees(15.0))?;
/// let elapsed = converter.microsteps_to_time(target)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GeometryConverter {
    mount: Mount,
    limits: AngleLimits,
}

impl GeometryConverter {
    /// Create a converter from a geometry model and angle bounds.
    pub fn new(mount: impl Into<Mount>, limits: AngleLimits) -> Self {
        Self {
            mount: mount.into(),
            limits,
        }
    }

    /// Create a converter from mount configuration.
    pub fn from_config(config: &MountConfig, limits: AngleLimits) -> Self {
        Self::new(Mount::from_config(config), limits)
    }

    /// Get the geometry model.
    #[inline]
    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Get the angle bounds.
    #[inline]
    pub fn limits(&self) -> &AngleLimits {
        &self.limits
    }

    /// Target microstep count after `elapsed` seconds of tracking.
    #[inline]
    pub fn time_to_microsteps(&self, elapsed: Seconds) -> Microsteps {
        self.mount.time_to_microsteps(elapsed)
    }

    /// Target microstep count for a commanded hinge angle.
    ///
    /// The angle is first checked against the operating bounds using the
    /// configured policy.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::AngleOutOfRange` if the policy is `Reject` and
    /// the angle lies outside the bounds, or if the angle is NaN.
    pub fn angle_to_microsteps(&self, angle: Degrees) -> Result<Microsteps> {
        let angle = self.limits.apply(angle).ok_or(GeometryError::AngleOutOfRange {
            angle: angle.0,
            min: self.limits.initial.0,
            max: self.limits.maximum.0,
        })?;

        Ok(self.time_to_microsteps(self.mount.angle_to_time(angle)))
    }

    /// Elapsed tracking time corresponding to a microstep count.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unreachable` if the mount cannot reach the position.
    #[inline]
    pub fn microsteps_to_time(&self, microsteps: Microsteps) -> Result<Seconds> {
        self.mount.microsteps_to_time(microsteps)
    }

    /// Hinge angle corresponding to a microstep count.
    ///
    /// Not clamped to the operating bounds.
    pub fn microsteps_to_angle(&self, microsteps: Microsteps) -> Result<Degrees> {
        let elapsed = self.microsteps_to_time(microsteps)?;
        Ok(self.mount.time_to_angle(elapsed))
    }

    /// Microstep position of the initial angle.
    pub fn initial_microsteps(&self) -> Microsteps {
        self.time_to_microsteps(self.mount.angle_to_time(self.limits.initial))
    }

    /// Microstep position of the maximum angle.
    pub fn maximum_microsteps(&self) -> Microsteps {
        self.time_to_microsteps(self.mount.angle_to_time(self.limits.maximum))
    }

    /// Instantaneous tracking speed in microsteps per second.
    #[inline]
    pub fn tracking_rate_at(&self, elapsed: Seconds) -> f64 {
        self.mount.tracking_rate_at(elapsed)
    }
}
