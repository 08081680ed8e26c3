//! Driver state type-state markers.
//!
//! Uses Rust's type system so that no line is touched before `init` has run.

/// Driver constructed but control lines not yet configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninitialized;

/// Driver configured and ready; asleep or awake at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Initialized;

/// Trait for driver states.
pub trait DriverState: private::Sealed {}

impl DriverState for Uninitialized {}
impl DriverState for Initialized {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Uninitialized {}
    impl Sealed for super::Initialized {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Uninitialized {
    fn name() -> &'static str {
        "Uninitialized"
    }
}

impl StateName for Initialized {
    fn name() -> &'static str {
        "Initialized"
    }
}

/// Power state of an initialized driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Outputs disabled, motor free to turn.
    Asleep,
    /// Outputs enabled, holding or stepping.
    Awake,
}
