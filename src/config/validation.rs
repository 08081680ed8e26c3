//! Configuration validation.
//!
//! Mechanical constants are taken as given. Only cross-field consistency is checked.

use crate::error::{ConfigError, Error, Result};

use super::TrackerConfig;

/// Validate a tracker configuration.
///
/// Checks:
/// - The mount geometry and the driver use the same microstep resolution
/// - The initial angle does not exceed the maximum angle
pub fn validate_config(config: &TrackerConfig) -> Result<()> {
    let mount = config.mount.microsteps_per_step();
    let driver = config.driver.stepping.divisor();
    if mount != driver {
        return Err(Error::Config(ConfigError::SteppingMismatch { mount, driver }));
    }

    if !config.limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidAngleBounds {
            initial: config.limits.initial.0,
            maximum: config.limits.maximum.0,
        }));
    }

    Ok(())
}
