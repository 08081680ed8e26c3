//! Recording fakes for driver tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use super::builder::Mp6500Builder;
use super::mp6500::Mp6500;
use super::pins::{CurrentReferencePin, Mp6500Pins};
use super::state::Initialized;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Dir,
    Step,
    Sleep,
    I1,
    I2,
    Ms1,
    Ms2,
    Enable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    High(Line),
    Low(Line),
    Output(Line),
    Float(Line),
    Duty(Line, u16),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct FakePin {
    line: Line,
    log: Log,
}

impl FakePin {
    pub fn new(line: Line, log: &Log) -> Self {
        Self {
            line,
            log: log.clone(),
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.push(Event::Low(self.line));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.push(Event::High(self.line));
        Ok(())
    }
}

impl CurrentReferencePin for FakePin {
    fn drive_low(&mut self) -> Result<(), Infallible> {
        self.push(Event::Low(self.line));
        Ok(())
    }

    fn set_as_output(&mut self) -> Result<(), Infallible> {
        self.push(Event::Output(self.line));
        Ok(())
    }

    fn set_as_floating_input(&mut self) -> Result<(), Infallible> {
        self.push(Event::Float(self.line));
        Ok(())
    }
}

impl pwm::ErrorType for FakePin {
    type Error = Infallible;
}

impl SetDutyCycle for FakePin {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.push(Event::Duty(self.line, duty));
        Ok(())
    }
}

pub struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub type FakePins =
    Mp6500Pins<FakePin, FakePin, FakePin, FakePin, FakePin, FakePin, FakePin, FakePin>;

pub type FakeDriver<STATE = Initialized> = Mp6500<
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakeDelay,
    STATE,
>;

pub type FakeBuilder = Mp6500Builder<
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakePin,
    FakeDelay,
>;

pub fn fake_pins(log: &Log) -> FakePins {
    Mp6500Pins {
        dir: FakePin::new(Line::Dir, log),
        step: FakePin::new(Line::Step, log),
        sleep: FakePin::new(Line::Sleep, log),
        i1: FakePin::new(Line::I1, log),
        i2: FakePin::new(Line::I2, log),
        ms1: FakePin::new(Line::Ms1, log),
        ms2: FakePin::new(Line::Ms2, log),
        enable: FakePin::new(Line::Enable, log),
    }
}

pub fn take(log: &Log) -> Vec<Event> {
    core::mem::take(&mut *log.borrow_mut())
}
