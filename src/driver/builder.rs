//! Builder pattern for Mp6500.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Stepping;
use crate::config::{DriverConfig, TrackerConfig};
use crate::error::{ConfigError, Error, Result};

use super::current::{CurrentLimit, PwmCurrentModel};
use super::mp6500::Mp6500;
use super::pins::{CurrentReferencePin, Mp6500Pins};
use super::state::{Initialized, Uninitialized};

/// Builder for creating Mp6500 instances.
pub struct Mp6500Builder<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY> {
    pins: Option<Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN>>,
    delay: Option<DELAY>,
    stepping: Stepping,
    current: Option<CurrentLimit>,
    pwm_model: PwmCurrentModel,
}

impl<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY> Default
    for Mp6500Builder<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY>
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
    fn default() -> Self {
        Self::new()
    }
}

impl<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY>
    Mp6500Builder<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY>
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
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            delay: None,
            stepping: Stepping::default(),
            current: None,
            pwm_model: PwmCurrentModel::default(),
        }
    }

    /// Set the control lines.
    pub fn pins(mut self, pins: Mp6500Pins<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN>) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the microstep resolution applied at init.
    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Set the current limit applied at init.
    pub fn current_limit(mut self, current: CurrentLimit) -> Self {
        self.current = Some(current);
        self
    }

    /// Set the current-to-duty conversion.
    pub fn pwm_model(mut self, model: PwmCurrentModel) -> Self {
        self.pwm_model = model;
        self
    }

    /// Configure from a DriverConfig.
    pub fn from_driver_config(mut self, config: &DriverConfig) -> Self {
        self.stepping = config.stepping;
        self.current = config.current;
        self.pwm_model = config.pwm;
        self
    }

    /// Configure from the driver section of a TrackerConfig.
    pub fn from_config(self, config: &TrackerConfig) -> Self {
        self.from_driver_config(&config.driver)
    }

    /// Build the driver without touching any line.
    ///
    /// # Errors
    ///
    /// Returns an error if pins or delay are missing.
    pub fn build(
        self,
    ) -> Result<Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, Uninitialized>> {
        let pins = self
            .pins
            .ok_or(Error::Config(ConfigError::MissingField("pins")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        Ok(Mp6500::new(pins, delay).with_pwm_model(self.pwm_model))
    }

    /// Build the driver and run `init` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if pins or delay are missing, or a line fails during init.
    pub fn init(
        self,
    ) -> Result<Mp6500<DIR, STEP, SLEEP, I1, I2, MS1, MS2, EN, DELAY, Initialized>> {
        let stepping = self.stepping;
        let current = self.current;
        self.build()?
            .init(stepping, current)
            .map_err(|(_, e)| e)
    }
}
