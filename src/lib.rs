//! # barndoor-tracker
//!
//! Sidereal tracking geometry and MP6500 stepper driver control for barn-door
//! star trackers, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Two mount geometries**: linear rod (constant rate) and isosceles curved rod (sinusoidal)
//! - **Invertible conversions**: time and angle to microsteps, and back, with domain errors
//! - **embedded-hal 1.0**: `OutputPin`, `pwm::SetDutyCycle` and `DelayNs` for the driver lines
//! - **no_std compatible**: Core library works without standard library
//! - **Type-state safety**: the driver cannot be used before `init`
//! - **Configuration-driven**: Define the mount and driver in a TOML file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use barndoor_tracker::{Degrees, Mp6500Builder, Seconds};
//!
//! let config = barndoor_tracker::load_config("tracker.toml")?;
//! let converter = config.converter();
//!
//! let mut driver = Mp6500Builder::new()
//!     .from_config(&config)
//!     .pins(pins)
//!     .delay(delay)
//!     .init()?;
//!
//! let target = converter.time_to_microsteps(Seconds(600.0));
//! driver.wakeup()?;
//! // hand `target` and driver.step_dir_pins() to the pulse generator
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]
// The driver is generic over each of its control lines
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;

// Re-exports for ergonomic API
pub use config::{validate_config, AngleLimits, LimitPolicy, MountConfig, TrackerConfig};
pub use driver::{CoarseCurrentLimit, CurrentLimit, Mp6500, Mp6500Builder, Mp6500Pins, PowerState};
pub use error::{Error, Result};
pub use geometry::{CurvedRod, GeometryConverter, LinearRod, Mount, MountGeometry};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Amps, Degrees, Microsteps, Seconds, Stepping};
