//! Tracker configuration - root configuration structure.

use serde::Deserialize;

use crate::geometry::GeometryConverter;

use super::driver::DriverConfig;
use super::limits::AngleLimits;
use super::mount::MountConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    /// Mount geometry (exactly one model).
    pub mount: MountConfig,

    /// Operating bounds for commanded angles.
    #[serde(default)]
    pub limits: AngleLimits,

    /// Stepper driver settings.
    #[serde(default)]
    pub driver: DriverConfig,
}

impl TrackerConfig {
    /// Create a configuration with default limits and driver settings.
    pub fn new(mount: MountConfig) -> Self {
        Self {
            mount,
            limits: AngleLimits::default(),
            driver: DriverConfig::default(),
        }
    }

    /// Build the geometry converter for this mount.
    pub fn converter(&self) -> GeometryConverter {
        GeometryConverter::from_config(&self.mount, self.limits)
    }
}
