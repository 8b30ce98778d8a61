//! Joint limits of the robot. Franka limits never wrap around, so this is a plain
//! interval check per joint, with both bounds inclusive.

use crate::kinematic_traits::{Joints, Solutions, JOINTS_NAN};
use crate::parameters::franka_kinematics::Parameters;

/// Solved angles that exceed a limit by less than this are rounding errors of a
/// configuration exactly at the limit and are moved onto it.
pub const LIMIT_TOLERANCE: f64 = 1E-9;

#[derive(Clone, Debug)]
pub struct Constraints {
    /// Lower limit, inclusive.
    pub from: Joints,

    /// Upper limit, inclusive.
    pub to: Joints,
}

impl Constraints {
    pub fn new(from: Joints, to: Joints) -> Self {
        Constraints { from, to }
    }

    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self::new(parameters.q_min, parameters.q_max)
    }

    /// True if all joints are finite and within limits. A joint exactly at the limit
    /// is compliant.
    pub fn compliant(&self, angles: &Joints) -> bool {
        (0..7).all(|i| angles[i] >= self.from[i] && angles[i] <= self.to[i])
    }

    /// True if this single joint value is within the limits of the given joint.
    pub fn joint_compliant(&self, joint: usize, angle: f64) -> bool {
        angle >= self.from[joint] && angle <= self.to[joint]
    }

    /// Moves angles that are outside a limit by no more than [`LIMIT_TOLERANCE`] onto
    /// that limit. Other values, NaN included, are left as they are.
    pub fn snap(&self, angles: Joints) -> Joints {
        std::array::from_fn(|i| {
            let angle = angles[i];
            if angle < self.from[i] && angle >= self.from[i] - LIMIT_TOLERANCE {
                self.from[i]
            } else if angle > self.to[i] && angle <= self.to[i] + LIMIT_TOLERANCE {
                self.to[i]
            } else {
                angle
            }
        })
    }

    /// Returns the angles (snapped onto the limits) if compliant, the NaN sentinel otherwise.
    pub fn validate(&self, angles: Joints) -> Joints {
        let angles = self.snap(angles);
        if self.compliant(&angles) {
            angles
        } else {
            JOINTS_NAN
        }
    }

    /// Validate all solution slots, keeping the slot positions.
    pub fn validate_all(&self, solutions: Solutions) -> Solutions {
        solutions.map(|s| self.validate(s))
    }

    /// Only compliant solutions (snapped onto the limits), slot positions are lost.
    pub fn filter(&self, solutions: &Solutions) -> Vec<Joints> {
        solutions.iter()
            .map(|angles| self.snap(*angles))
            .filter(|angles| self.compliant(angles))
            .collect()
    }

    /// Middle of the allowed range for each joint.
    pub fn centers(&self) -> Joints {
        std::array::from_fn(|i| (self.from[i] + self.to[i]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::franka_kinematics::is_sentinel;

    fn panda() -> Constraints {
        Constraints::from_parameters(&Parameters::panda())
    }

    #[test]
    fn test_within_limits() {
        let limits = panda();
        let angles = [0.0, -0.785, 0.0, -2.356, 0.0, 1.571, 0.785];
        assert!(limits.compliant(&angles));
        assert_eq!(limits.validate(angles), angles);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let limits = panda();
        assert!(limits.compliant(&limits.from));
        assert!(limits.compliant(&limits.to));
        for i in 0..7 {
            assert!(limits.joint_compliant(i, limits.from[i]));
            assert!(limits.joint_compliant(i, limits.to[i]));
        }
    }

    #[test]
    fn test_just_outside_limits() {
        let limits = panda();
        for i in 0..7 {
            let mut below = limits.centers();
            below[i] = limits.from[i] - 1E-6;
            assert!(!limits.compliant(&below), "joint {} below the limit", i + 1);
            assert!(is_sentinel(&limits.validate(below)));

            let mut above = limits.centers();
            above[i] = limits.to[i] + 1E-6;
            assert!(!limits.compliant(&above), "joint {} above the limit", i + 1);
            assert!(is_sentinel(&limits.validate(above)));
        }
    }

    #[test]
    fn test_rounding_at_limit_is_snapped() {
        let limits = panda();
        for i in 0..7 {
            let mut below = limits.centers();
            below[i] = limits.from[i] - 1E-12;
            assert!(!limits.compliant(&below));
            let validated = limits.validate(below);
            assert_eq!(validated[i], limits.from[i], "joint {}", i + 1);

            let mut above = limits.centers();
            above[i] = limits.to[i] + 1E-12;
            let validated = limits.validate(above);
            assert_eq!(validated[i], limits.to[i], "joint {}", i + 1);
            // Other joints untouched
            assert_eq!(validated[(i + 1) % 7], above[(i + 1) % 7]);
        }
    }

    #[test]
    fn test_nan_is_not_compliant() {
        let limits = panda();
        let mut angles = limits.centers();
        angles[4] = f64::NAN;
        assert!(!limits.compliant(&angles));
        // Partially NaN input becomes the full sentinel
        assert!(is_sentinel(&limits.validate(angles)));
    }

    #[test]
    fn test_validate_all_keeps_slots() {
        let limits = panda();
        let good = limits.centers();
        let mut bad = good;
        bad[3] = 0.5; // J4 must be negative
        let validated = limits.validate_all([good, bad, JOINTS_NAN, good]);
        assert_eq!(validated[0], good);
        assert!(is_sentinel(&validated[1]));
        assert!(is_sentinel(&validated[2]));
        assert_eq!(validated[3], good);
        assert_eq!(limits.filter(&validated).len(), 2);
    }
}
