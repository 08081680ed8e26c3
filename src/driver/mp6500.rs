//! MP6500 stepper driver control.
//!
//! Generic over embedded-hal 1.0 pin and delay types with type-state safety.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::{Amps, Stepping};
use crate::config::MountConfig;
use crate::error::{ConfigError, DriverError, Error, Result};

use super::current::{CoarseCurrentLimit, CurrentLimit, PwmCurrentModel, DEFAULT_COARSE_CURRENT};
use super::pins::{CurrentReferencePin, Mp6500Pins, NoPin, ReferenceLevel};
use super::state::{DriverState, Initialized, PowerState, StateName, Uninitialized};

/// Time for the driver to latch a new microstep resolution.
pub const STEPPING_SETTLE_MS: u32 = 5;

/// Time for the driver to power up after leaving sleep (about 1 ms per datasheet).
pub const WAKE_SETTLE_MS: u32 = 5;

/// MP6500 stepper driver with type-state safety.
///
/// Owns every control line. STEP and DIR are lent to the pulse generator
/// through [`Mp6500::step_dir_pins`]; everything else only changes through
/// this type, in an order the hardware accepts.
pub struct Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, STATE = Initialized>
where
    STATE: DriverState,
{
    pins: Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN>,

    /// Delay provider for settle times.
    delay: DELAY,

    /// Whether the sleep line is low.
    sleeping: bool,

    /// Active microstep resolution.
    stepping: Stepping,

    /// Active current limit.
    current_limit: CurrentLimit,

    /// Current-to-duty conversion for continuous mode.
    pwm_model: PwmCurrentModel,

    _state: PhantomData<STATE>,
}

impl<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, STATE>
    Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, STATE>
where
    STATE: DriverState + StateName,
{
    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Get the current-to-duty conversion.
    #[inline]
    pub fn pwm_model(&self) -> &PwmCurrentModel {
        &self.pwm_model
    }

    /// Give back the pins and delay provider.
    pub fn release(self) -> (Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN>, DELAY) {
        (self.pins, self.delay)
    }

    fn into_state<S: DriverState>(
        self,
    ) -> Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, S> {
        Mp6500 {
            pins: self.pins,
            delay: self.delay,
            sleeping: self.sleeping,
            stepping: self.stepping,
            current_limit: self.current_limit,
            pwm_model: self.pwm_model,
            _state: PhantomData,
        }
    }
}

impl<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY>
    Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, Uninitialized>
where
    DIR: OutputPin,
    STEP: OutputPin,
    SLEEP: OutputPin,
    I1: CurrentReferencePin + SetDutyCycle,
    I2: CurrentReferencePin,
    MS1: OutputPin,
    MS2: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Take ownership of the control lines without touching them.
    pub fn new(pins: Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN>, delay: DELAY) -> Self {
        Self {
            pins,
            delay,
            sleeping: true,
            stepping: Stepping::default(),
            current_limit: CurrentLimit::Coarse(DEFAULT_COARSE_CURRENT),
            pwm_model: PwmCurrentModel::default(),
            _state: PhantomData,
        }
    }

    /// Use a different current-to-duty conversion.
    pub fn with_pwm_model(mut self, model: PwmCurrentModel) -> Self {
        self.pwm_model = model;
        self
    }

    /// Configure the driver and leave it asleep.
    ///
    /// Forces the sleep line low first, then applies the microstep resolution
    /// and the current limit. With no current given the coarse mid-level
    /// ([`DEFAULT_COARSE_CURRENT`]) is applied.
    ///
    /// Blocks for [`STEPPING_SETTLE_MS`].
    ///
    /// On a pin failure the driver is handed back uninitialized with the error.
    pub fn init(
        self,
        stepping: Stepping,
        current: Option<CurrentLimit>,
    ) -> core::result::Result<
        Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, Initialized>,
        (Self, Error),
    > {
        let mut driver = self.into_state::<Initialized>();

        match driver.configure(stepping, current) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "mp6500: initialized, stepping={} current={}",
                    driver.stepping,
                    driver.current_limit
                );
                Ok(driver)
            }
            Err(e) => Err((driver.into_state(), e)),
        }
    }
}

impl<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY>
    Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, Initialized>
where
    DIR: OutputPin,
    STEP: OutputPin,
    SLEEP: OutputPin,
    I1: CurrentReferencePin + SetDutyCycle,
    I2: CurrentReferencePin,
    MS1: OutputPin,
    MS2: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn configure(&mut self, stepping: Stepping, current: Option<CurrentLimit>) -> Result<()> {
        self.pins.enable.set_low().map_err(|_| DriverError::Pin)?;
        self.pins.step.set_low().map_err(|_| DriverError::Pin)?;
        self.pins.dir.set_low().map_err(|_| DriverError::Pin)?;

        self.pins.sleep.set_low().map_err(|_| DriverError::Pin)?;
        self.sleeping = true;

        self.set_stepping(stepping)?;

        match current {
            None => self.set_coarse_current_limit(DEFAULT_COARSE_CURRENT),
            Some(CurrentLimit::Coarse(level)) => self.set_coarse_current_limit(level),
            Some(CurrentLimit::Continuous(amps)) => self.set_current_limit(amps),
        }
    }

    /// Whether the driver outputs are disabled.
    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Current power state.
    #[inline]
    pub fn power_state(&self) -> PowerState {
        if self.sleeping {
            PowerState::Asleep
        } else {
            PowerState::Awake
        }
    }

    /// Active microstep resolution.
    #[inline]
    pub fn stepping(&self) -> Stepping {
        self.stepping
    }

    /// Active current limit.
    #[inline]
    pub fn current_limit(&self) -> CurrentLimit {
        self.current_limit
    }

    /// Borrow STEP and DIR for the pulse generator.
    #[inline]
    pub fn step_dir_pins(&mut self) -> (&mut STEP, &mut DIR) {
        (&mut self.pins.step, &mut self.pins.dir)
    }

    /// Select the microstep resolution and wait for it to latch.
    ///
    /// Allowed while awake, but changing resolution mid-move is the caller's
    /// responsibility. Blocks for [`STEPPING_SETTLE_MS`].
    ///
    /// A `GeometryConverter` built for the previous resolution now produces
    /// wrong targets. Rebuild it from a mount with the new microsteps per step,
    /// and confirm with [`Mp6500::check_stepping`].
    pub fn set_stepping(&mut self, stepping: Stepping) -> Result<()> {
        let (ms1, ms2) = stepping.select_lines();
        self.pins.ms1.set_state(ms1.into()).map_err(|_| DriverError::Pin)?;
        self.pins.ms2.set_state(ms2.into()).map_err(|_| DriverError::Pin)?;
        self.delay.delay_ms(STEPPING_SETTLE_MS);
        self.stepping = stepping;

        #[cfg(feature = "defmt")]
        defmt::trace!("mp6500: stepping {}", stepping);
        Ok(())
    }

    /// Check that the active resolution matches what the mount geometry assumes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SteppingMismatch` if they differ.
    pub fn check_stepping(&self, mount: &MountConfig) -> Result<()> {
        let expected = mount.microsteps_per_step();
        let actual = self.stepping.divisor();
        if expected != actual {
            return Err(Error::Config(ConfigError::SteppingMismatch {
                mount: expected,
                driver: actual,
            }));
        }
        Ok(())
    }

    /// Disable the driver outputs. No-op when already asleep.
    pub fn sleep(&mut self) -> Result<()> {
        if !self.sleeping {
            self.pins.sleep.set_low().map_err(|_| DriverError::Pin)?;
            self.sleeping = true;

            #[cfg(feature = "defmt")]
            defmt::trace!("mp6500: sleep");
        }
        Ok(())
    }

    /// Enable the driver outputs and wait for power-up. No-op when already awake.
    ///
    /// Blocks for [`WAKE_SETTLE_MS`], so the first step pulse afterwards is honoured.
    pub fn wakeup(&mut self) -> Result<()> {
        if self.sleeping {
            self.pins.sleep.set_high().map_err(|_| DriverError::Pin)?;
            self.delay.delay_ms(WAKE_SETTLE_MS);
            self.sleeping = false;

            #[cfg(feature = "defmt")]
            defmt::trace!("mp6500: wakeup");
        }
        Ok(())
    }

    /// Set a continuous current limit through the PWM reference on I1.
    ///
    /// I2 is held driven low while in this mode.
    pub fn set_current_limit(&mut self, current: Amps) -> Result<()> {
        Self::set_reference(&mut self.pins.i2, ReferenceLevel::Low)?;
        Self::set_reference(&mut self.pins.i1, ReferenceLevel::Low)?;

        let duty = self.pwm_model.duty_for(current);
        self.pins
            .i1
            .set_duty_cycle_fraction(duty as u16, PwmCurrentModel::DUTY_MAX as u16)
            .map_err(|_| DriverError::Pin)?;
        self.current_limit = CurrentLimit::Continuous(current);

        #[cfg(feature = "defmt")]
        defmt::debug!("mp6500: current limit {} A, duty {}/255", current.0, duty);
        Ok(())
    }

    /// Select one of the four coarse current levels.
    pub fn set_coarse_current_limit(&mut self, level: CoarseCurrentLimit) -> Result<()> {
        if let CurrentLimit::Continuous(_) = self.current_limit {
            self.pins
                .i1
                .set_duty_cycle_fully_off()
                .map_err(|_| DriverError::Pin)?;
        }

        let (i1, i2) = level.reference_levels();
        Self::set_reference(&mut self.pins.i1, i1)?;
        Self::set_reference(&mut self.pins.i2, i2)?;
        self.current_limit = CurrentLimit::Coarse(level);

        #[cfg(feature = "defmt")]
        defmt::debug!("mp6500: coarse current limit {}", level);
        Ok(())
    }

    // Latch goes low before the direction changes, so switching to an output never glitches high.
    fn set_reference<P: CurrentReferencePin>(pin: &mut P, level: ReferenceLevel) -> Result<()> {
        pin.drive_low().map_err(|_| DriverError::Pin)?;
        match level {
            ReferenceLevel::Low => pin.set_as_output(),
            ReferenceLevel::HighImpedance => pin.set_as_floating_input(),
        }
        .map_err(|_| DriverError::Pin)?;
        Ok(())
    }
}

/// Driver without a chip-enable line.
pub type Mp6500NoEnable<DIR, STEP, SLEEP, I1, I2, MS1, MS2, DELAY, STATE = Initialized> =
    Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, NoPin, DELAY, STATE>;
