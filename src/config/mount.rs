//! Mount geometry configuration from TOML.

use serde::Deserialize;

use super::units::Seconds;

/// Length of one sidereal day in seconds.
pub const SIDEREAL_SECONDS: f64 = 86164.0916;

fn default_sidereal() -> Seconds {
    Seconds(SIDEREAL_SECONDS)
}

fn default_step_angle() -> f64 {
    1.8
}

/// Straight threaded rod driven through a gear pair.
///
/// Travel along the rod is linear in time to first order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearRodConfig {
    /// Degrees of motor rotation per full step.
    #[serde(default = "default_step_angle")]
    pub step_angle_deg: f64,

    /// Microsteps per full step. Must match the driver's stepping.
    pub microsteps_per_step: u16,

    /// Teeth on the motor gear.
    pub motor_gear_teeth: u16,

    /// Teeth on the gear that turns the rod.
    pub rod_gear_teeth: u16,

    /// Thread pitch of the rod in millimetres (M5: 0.8, M6: 1.0, M8: 1.25).
    pub thread_pitch_mm: f64,

    /// Distance from hinge to rod centre in millimetres.
    pub base_length_mm: f64,

    /// Duration of one sidereal rotation.
    #[serde(default = "default_sidereal")]
    pub sidereal_seconds: Seconds,
}

/// Isosceles mount with a curved rod pushing the hinged door.
///
/// The rod traces a chord of the hinge circle, so travel is sinusoidal in time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurvedRodConfig {
    /// Degrees of motor rotation per full step.
    #[serde(default = "default_step_angle")]
    pub step_angle_deg: f64,

    /// Microsteps per full step. Must match the driver's stepping.
    pub microsteps_per_step: u16,

    /// Threads per centimetre of rod length.
    pub threads_per_cm: f64,

    /// Distance from hinge to rod centre in centimetres.
    pub base_length_cm: f64,

    /// Duration of one sidereal rotation.
    #[serde(default = "default_sidereal")]
    pub sidereal_seconds: Seconds,
}

/// Geometry of the mount, selected by table name.
///
/// ```toml
/// [mount.curved_rod]
/// microsteps_per_step = 8
/// threads_per_cm = 8.0
/// base_length_cm = 30.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum MountConfig {
    /// Straight rod, linear in time.
    LinearRod(LinearRodConfig),
    /// Isosceles curved rod, sinusoidal in time.
    CurvedRod(CurvedRodConfig),
}

impl MountConfig {
    /// Microsteps per full step assumed by the geometry.
    pub fn microsteps_per_step(&self) -> u16 {
        match self {
            MountConfig::LinearRod(c) => c.microsteps_per_step,
            MountConfig::CurvedRod(c) => c.microsteps_per_step,
        }
    }

    /// Sidereal day length used by the geometry.
    pub fn sidereal_seconds(&self) -> Seconds {
        match self {
            MountConfig::LinearRod(c) => c.sidereal_seconds,
            MountConfig::CurvedRod(c) => c.sidereal_seconds,
        }
    }

    /// Short name of the mount type.
    pub fn kind(&self) -> &'static str {
        match self {
            MountConfig::LinearRod(_) => "linear_rod",
            MountConfig::CurvedRod(_) => "curved_rod",
        }
    }
}
