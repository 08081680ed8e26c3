//! Error types for barndoor-tracker.
//!
//! Provides unified error handling across configuration, geometry conversion, and driver control.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all barndoor-tracker operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Geometry conversion error
    Geometry(GeometryError),
    /// Stepper driver error
    Driver(DriverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Microstep multiplier not supported by the driver (1, 2, 4 or 8)
    InvalidStepping(u16),
    /// Mount geometry and driver disagree on microstep resolution
    SteppingMismatch {
        /// Microsteps per step assumed by the mount geometry
        mount: u16,
        /// Microsteps per step configured on the driver
        driver: u16,
    },
    /// Operating angle bounds are inverted
    InvalidAngleBounds {
        /// Initial angle in degrees
        initial: f64,
        /// Maximum angle in degrees
        maximum: f64,
    },
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Geometry conversion errors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Microstep count lies outside the mechanical reach of the mount
    Unreachable {
        /// Requested microstep count
        microsteps: i64,
        /// Largest reachable microstep magnitude
        max: f64,
    },
    /// Commanded angle lies outside the operating bounds
    AngleOutOfRange {
        /// Requested angle in degrees
        angle: f64,
        /// Lower bound in degrees
        min: f64,
        /// Upper bound in degrees
        max: f64,
    },
}

/// Stepper driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// GPIO or PWM operation failed on the platform side
    Pin,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Geometry(e) => write!(f, "Geometry error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepping(v) => {
                write!(f, "Invalid stepping: {}. Valid values: 1, 2, 4, 8", v)
            }
            ConfigError::SteppingMismatch { mount, driver } => write!(
                f,
                "Mount assumes {} microsteps per step but driver is set to {}",
                mount, driver
            ),
            ConfigError::InvalidAngleBounds { initial, maximum } => write!(
                f,
                "Invalid angle bounds: initial ({}) must be <= maximum ({})",
                initial, maximum
            ),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Unreachable { microsteps, max } => write!(
                f,
                "Microstep count {} is beyond mount reach of {}",
                microsteps, max
            ),
            GeometryError::AngleOutOfRange { angle, min, max } => {
                write!(f, "Angle {} outside operating range [{}, {}]", angle, min, max)
            }
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Pin => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
