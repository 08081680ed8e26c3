//! Configuration module for barndoor-tracker.
//!
//! Provides types for loading and validating mount geometry and driver settings
//! from TOML files (with `std` feature) or values built in code.

mod driver;
mod limits;
mod mount;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use driver::DriverConfig;
pub use limits::{AngleLimits, LimitPolicy};
pub use mount::{CurvedRodConfig, LinearRodConfig, MountConfig, SIDEREAL_SECONDS};
pub use system::TrackerConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Amps, Degrees, Microsteps, Seconds, Stepping};
