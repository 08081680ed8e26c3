//! Control lines owned by the driver.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Level of a current reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceLevel {
    /// Driven low as an output.
    Low,
    /// Floating input, letting the on-board divider set the level.
    HighImpedance,
}

/// A pin that switches between a driven output and a floating input.
///
/// embedded-hal 1.0 has no direction-switching trait, so platforms implement
/// this on their flexible GPIO type (for example a `Flex` pin).
pub trait CurrentReferencePin: ErrorType {
    /// Set the output latch low. Does not change the direction.
    fn drive_low(&mut self) -> Result<(), Self::Error>;

    /// Configure as a push-pull output.
    fn set_as_output(&mut self) -> Result<(), Self::Error>;

    /// Configure as a floating input.
    fn set_as_floating_input(&mut self) -> Result<(), Self::Error>;
}

/// Placeholder for an unconnected optional line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Every control line of an MP6500 carrier.
///
/// Pass `NoPin` for `enable` when the chip-enable line is not wired.
#[derive(Debug)]
pub struct Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN = NoPin> {
    /// Direction line, handed to the pulse generator.
    pub dir: DIR,
    /// Step line, handed to the pulse generator.
    pub step: STEP,
    /// Sleep line (high = awake).
    pub sleep: SLEEP,
    /// Current reference line 1, also used for PWM current control.
    pub i1: I1,
    /// Current reference line 2.
    pub i2: I2,
    /// Microstep select line 1.
    pub ms1: MS1,
    /// Microstep select line 2.
    pub ms2: MS2,
    /// Optional chip-enable line (low = enabled).
    pub enable: EN,
}
