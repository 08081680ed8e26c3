//! Driver module for barndoor-tracker.
//!
//! Provides MP6500 stepper driver control: sleep and wake, microstep resolution,
//! and coarse or PWM current limiting, each applied in a hardware-safe order.

mod builder;
mod current;
mod mp6500;
mod pins;
pub mod state;
#[cfg(test)]
mod testing;

pub use builder::Mp6500Builder;
pub use current::{CoarseCurrentLimit, CurrentLimit, PwmCurrentModel, DEFAULT_COARSE_CURRENT};
pub use mp6500::{Mp6500, Mp6500NoEnable, STEPPING_SETTLE_MS, WAKE_SETTLE_MS};
pub use pins::{CurrentReferencePin, Mp6500Pins, NoPin, ReferenceLevel};
pub use state::{DriverState, Initialized, PowerState, StateName, Uninitialized};
