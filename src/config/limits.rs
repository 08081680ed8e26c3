//! Operating angle bounds and the policy applied to commands outside them.

use serde::Deserialize;

use super::units::Degrees;

/// Policy for handling out-of-range angle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Reject angles outside the bounds.
    #[default]
    Reject,
    /// Clamp the angle to the nearest bound.
    Clamp,
}

/// Operating bounds for the commanded hinge angle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleLimits {
    /// Angle of the doors when the tracker is switched on.
    #[serde(rename = "initial_angle_deg", default = "default_initial_angle")]
    pub initial: Degrees,

    /// Largest angle the doors may open to (30 degrees is about 2 hours).
    #[serde(rename = "maximum_angle_deg", default = "default_maximum_angle")]
    pub maximum: Degrees,

    /// What to do when a command falls outside the bounds.
    #[serde(default)]
    pub policy: LimitPolicy,
}

fn default_initial_angle() -> Degrees {
    Degrees(0.0)
}

fn default_maximum_angle() -> Degrees {
    Degrees(30.0)
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self {
            initial: default_initial_angle(),
            maximum: default_maximum_angle(),
            policy: LimitPolicy::default(),
        }
    }
}

impl AngleLimits {
    /// Create new angle limits.
    pub fn new(initial: Degrees, maximum: Degrees, policy: LimitPolicy) -> Self {
        Self {
            initial,
            maximum,
            policy,
        }
    }

    /// Check if bounds are ordered.
    pub fn is_valid(&self) -> bool {
        self.initial.0 <= self.maximum.0
    }

    /// Check if an angle is within bounds.
    pub fn contains(&self, angle: Degrees) -> bool {
        angle.0 >= self.initial.0 && angle.0 <= self.maximum.0
    }

    /// Apply the limit policy to a commanded angle.
    ///
    /// Returns `Some(angle)` if valid or clamped, `None` if rejected.
    /// A NaN angle is rejected under every policy.
    pub fn apply(&self, angle: Degrees) -> Option<Degrees> {
        if angle.0.is_nan() {
            None
        } else if self.contains(angle) {
            Some(angle)
        } else {
            match self.policy {
                LimitPolicy::Reject => None,
                LimitPolicy::Clamp => {
                    if angle.0 < self.initial.0 {
                        Some(self.initial)
                    } else {
                        Some(self.maximum)
                    }
                }
            }
        }
    }
}
