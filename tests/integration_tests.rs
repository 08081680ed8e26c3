//! Integration tests for barndoor-tracker.
//!
//! These tests verify the workflow from TOML parsing to geometry conversion
//! and driver initialization.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use barndoor_tracker::config::{parse_config, MountConfig};
use barndoor_tracker::driver::{CurrentReferencePin, Mp6500Builder, Mp6500Pins, NoPin};
use barndoor_tracker::error::{ConfigError, Error, GeometryError};
use barndoor_tracker::{
    CoarseCurrentLimit, CurrentLimit, Degrees, LimitPolicy, Microsteps, MountGeometry,
    PowerState, Seconds, Stepping,
};

// =============================================================================
// Test configuration data
// =============================================================================

const LINEAR_CONFIG: &str = r#"
[mount.linear_rod]
step_angle_deg = 1.8
microsteps_per_step = 8
motor_gear_teeth = 24
rod_gear_teeth = 75
thread_pitch_mm = 0.8
base_length_mm = 182.8
"#;

const CURVED_CONFIG: &str = r#"
[mount.curved_rod]
step_angle_deg = 1.8
microsteps_per_step = 8
threads_per_cm = 8.0
base_length_cm = 30.5

[limits]
initial_angle_deg = 0.0
maximum_angle_deg = 30.0
policy = "clamp"

[driver]
stepping = 8
current = { continuous = 1.0 }
"#;

const SIDEREAL: f64 = 86164.0916;

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn parse_linear_rod_defaults() {
    let config = parse_config(LINEAR_CONFIG).expect("Should parse linear config");

    match config.mount {
        MountConfig::LinearRod(rod) => {
            assert_eq!(rod.motor_gear_teeth, 24);
            assert_eq!(rod.rod_gear_teeth, 75);
            assert_eq!(rod.sidereal_seconds, Seconds(SIDEREAL));
        }
        other => panic!("Expected linear rod, got {}", other.kind()),
    }

    assert_eq!(config.limits.initial, Degrees(0.0));
    assert_eq!(config.limits.maximum, Degrees(30.0));
    assert_eq!(config.limits.policy, LimitPolicy::Reject);
    assert_eq!(config.driver.stepping, Stepping::Eighth);
    assert!(config.driver.current.is_none());
}

#[test]
fn parse_curved_rod_with_driver_section() {
    let config = parse_config(CURVED_CONFIG).expect("Should parse curved config");

    assert_eq!(config.mount.kind(), "curved_rod");
    assert_eq!(config.limits.policy, LimitPolicy::Clamp);
    assert_eq!(
        config.driver.current,
        Some(CurrentLimit::Continuous(barndoor_tracker::Amps(1.0)))
    );
}

#[test]
fn reject_unsupported_stepping() {
    let toml = format!("{}\n[driver]\nstepping = 16\n", LINEAR_CONFIG);
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn reject_mount_driver_mismatch() {
    let toml = format!("{}\n[driver]\nstepping = 4\n", LINEAR_CONFIG);
    assert!(matches!(
        parse_config(&toml),
        Err(Error::Config(ConfigError::SteppingMismatch { mount: 8, driver: 4 }))
    ));
}

#[test]
fn load_config_from_file() {
    let path = std::env::temp_dir().join("barndoor_tracker_load_config.toml");
    std::fs::write(&path, CURVED_CONFIG).unwrap();

    let config = barndoor_tracker::load_config(&path).expect("Should load from file");
    assert_eq!(config.mount.kind(), "curved_rod");

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_config_missing_file() {
    let result = barndoor_tracker::load_config("/nonexistent/barndoor/tracker.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

// =============================================================================
// Geometry scenarios
// =============================================================================

#[test]
fn linear_rod_one_hour() {
    let converter = parse_config(LINEAR_CONFIG).unwrap().converter();
    assert_eq!(
        converter.time_to_microsteps(Seconds(3600.0)),
        Microsteps(299_924)
    );
}

#[test]
fn curved_rod_quarter_day() {
    let converter = parse_config(CURVED_CONFIG).unwrap().converter();
    let expected = (780_800.0 * (std::f64::consts::PI / 4.0).sin()) as i64;

    assert_eq!(
        converter.time_to_microsteps(Seconds(SIDEREAL / 4.0)),
        Microsteps(expected)
    );
}

#[test]
fn origin_for_both_geometries() {
    for toml in [LINEAR_CONFIG, CURVED_CONFIG] {
        let config = parse_config(toml).unwrap();
        let converter = config.converter();

        assert_eq!(converter.time_to_microsteps(Seconds(0.0)), Microsteps(0));
        assert_eq!(
            converter.angle_to_microsteps(config.limits.initial).unwrap(),
            Microsteps(0)
        );
    }
}

#[test]
fn angle_limits_follow_policy() {
    let linear = parse_config(LINEAR_CONFIG).unwrap().converter();
    assert!(matches!(
        linear.angle_to_microsteps(Degrees(45.0)),
        Err(Error::Geometry(GeometryError::AngleOutOfRange { .. }))
    ));

    let curved = parse_config(CURVED_CONFIG).unwrap().converter();
    assert_eq!(
        curved.angle_to_microsteps(Degrees(45.0)).unwrap(),
        curved.angle_to_microsteps(Degrees(30.0)).unwrap()
    );
}

#[test]
fn curved_rod_reports_unreachable_positions() {
    let converter = parse_config(CURVED_CONFIG).unwrap().converter();

    assert!(converter.microsteps_to_time(Microsteps(780_800)).is_ok());
    assert!(matches!(
        converter.microsteps_to_time(Microsteps(780_801)),
        Err(Error::Geometry(GeometryError::Unreachable { .. }))
    ));
    assert_eq!(converter.mount().max_microsteps(), Some(780_800.0));
}

#[test]
fn display_time_from_motor_position() {
    // A tracker restarted mid-session recovers elapsed time from the motor position.
    let converter = parse_config(CURVED_CONFIG).unwrap().converter();
    let position = converter.time_to_microsteps(Seconds(5400.0));
    let elapsed = converter.microsteps_to_time(position).unwrap();

    assert!(elapsed.0 <= 5400.0);
    assert!(5400.0 - elapsed.0 < 1.0 / converter.tracking_rate_at(Seconds(5400.0)) + 1e-6);
}

// =============================================================================
// Driver
// =============================================================================

#[derive(Clone, Default)]
struct Lines {
    sleep: Rc<RefCell<Vec<bool>>>,
}

struct SleepLine(Lines);

impl embedded_hal::digital::ErrorType for SleepLine {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for SleepLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.sleep.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.sleep.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Default)]
struct RefLine {
    floating: bool,
    duty: u16,
}

impl embedded_hal::digital::ErrorType for RefLine {
    type Error = Infallible;
}

impl CurrentReferencePin for RefLine {
    fn drive_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_as_output(&mut self) -> Result<(), Infallible> {
        self.floating = false;
        Ok(())
    }

    fn set_as_floating_input(&mut self) -> Result<(), Infallible> {
        self.floating = true;
        Ok(())
    }
}

impl embedded_hal::pwm::ErrorType for RefLine {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for RefLine {
    fn max_duty_cycle(&self) -> u16 {
        1023
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duty = duty;
        Ok(())
    }
}

struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn pins(lines: &Lines) -> Mp6500Pins<NoPin, NoPin, SleepLine, RefLine, RefLine, NoPin, NoPin> {
    Mp6500Pins {
        dir: NoPin,
        step: NoPin,
        sleep: SleepLine(lines.clone()),
        i1: RefLine::default(),
        i2: RefLine::default(),
        ms1: NoPin,
        ms2: NoPin,
        enable: NoPin,
    }
}

#[test]
fn driver_init_without_current_uses_coarse_mid_level() {
    let lines = Lines::default();
    let driver = Mp6500Builder::new()
        .pins(pins(&lines))
        .delay(NoDelay)
        .init()
        .expect("init should succeed");

    assert_eq!(driver.power_state(), PowerState::Asleep);
    assert_eq!(
        driver.current_limit(),
        CurrentLimit::Coarse(CoarseCurrentLimit::One)
    );

    // One: I1 driven low, I2 floating.
    let (pins, _) = driver.release();
    assert!(!pins.i1.floating);
    assert!(pins.i2.floating);
    assert_eq!(*lines.sleep.borrow(), vec![false]);
}

#[test]
fn driver_from_config_applies_continuous_current() {
    let config = parse_config(CURVED_CONFIG).unwrap();
    let lines = Lines::default();
    let driver = Mp6500Builder::new()
        .from_config(&config)
        .pins(pins(&lines))
        .delay(NoDelay)
        .init()
        .unwrap();

    let (pins, _) = driver.release();
    // 98/255 scaled to a 10-bit timer.
    assert_eq!(pins.i1.duty, 393);
    assert!(!pins.i1.floating);
    assert!(!pins.i2.floating);
}

#[test]
fn tracking_session_sequence() {
    let config = parse_config(LINEAR_CONFIG).unwrap();
    let converter = config.converter();
    let lines = Lines::default();
    let mut driver = Mp6500Builder::new()
        .from_config(&config)
        .pins(pins(&lines))
        .delay(NoDelay)
        .init()
        .unwrap();

    assert_eq!(driver.stepping().divisor(), 8);

    driver.wakeup().unwrap();
    let target = converter.angle_to_microsteps(Degrees(15.0)).unwrap();
    assert!(target > Microsteps(0));
    driver.wakeup().unwrap();
    driver.sleep().unwrap();
    driver.sleep().unwrap();

    assert_eq!(*lines.sleep.borrow(), vec![false, true, false]);
}
