//! Helper functions

use crate::kinematic_traits::{Joints, Solutions};

/// Checks the solution for validity. A valid solution has all 7 joint values finite,
/// the NaN sentinel has none.
pub mod franka_kinematics {
    use crate::kinematic_traits::Joints;

    /// Checks if all elements in the array are finite
    pub fn is_valid(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_finite())
    }

    /// Checks if all elements in the array are NaN (the invalid solution sentinel).
    pub fn is_sentinel(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_nan())
    }

    /// Returns the solution if valid, None for the sentinel.
    pub fn valid(qs: &Joints) -> Option<Joints> {
        if is_valid(qs) { Some(*qs) } else { None }
    }
}

/// Print joint values for all solutions, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    for (sol_idx, solution) in solutions.iter().enumerate() {
        if franka_kinematics::is_valid(solution) {
            println!("{}. [{}]", sol_idx, format_degrees(solution));
        } else {
            println!("{}. no solution", sol_idx);
        }
    }
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    println!("[{}]", format_degrees(joints));
}

fn format_degrees(joints: &Joints) -> String {
    let mut row_str = String::new();
    for joint in joints {
        row_str.push_str(&format!("{:7.2} ", joint.to_degrees()));
    }
    row_str.trim_end().to_string()
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians(degrees: [f64; 7]) -> Joints {
    std::array::from_fn(|i| degrees[i].to_radians())
}

/// Largest absolute difference between the corresponding joints. NaN if any joint is NaN.
pub fn max_joint_distance(a: &Joints, b: &Joints) -> f64 {
    let mut distance: f64 = 0.0;
    for i in 0..7 {
        let d = (a[i] - b[i]).abs();
        if d.is_nan() {
            return f64::NAN;
        }
        distance = distance.max(d);
    }
    distance
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use super::franka_kinematics::*;
    use super::*;
    use crate::kinematic_traits::JOINTS_NAN;

    #[test]
    fn test_is_valid_with_all_finite() {
        let qs = [0.0, 1.0, -1.0, 0.5, -0.5, PI, 0.1];
        assert!(is_valid(&qs));
        assert!(!is_sentinel(&qs));
    }

    #[test]
    fn test_is_valid_with_nan() {
        let qs = [0.0, f64::NAN, 1.0, -1.0, 0.5, -0.5, 0.1];
        assert!(!is_valid(&qs));
        // Partially NaN is neither valid nor the sentinel
        assert!(!is_sentinel(&qs));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        let qs = [0.0, f64::INFINITY, 1.0, -1.0, 0.5, -0.5, 0.1];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_sentinel() {
        assert!(is_sentinel(&JOINTS_NAN));
        assert_eq!(valid(&JOINTS_NAN), None);
    }

    #[test]
    fn test_max_joint_distance() {
        let a = [0.0, 0.1, 0.2, -1.0, 0.0, 1.0, 0.0];
        let b = [0.0, 0.1, 0.25, -1.0, 0.0, 1.0, -0.3];
        assert!((max_joint_distance(&a, &b) - 0.3).abs() < 1E-12);
        assert!(max_joint_distance(&a, &JOINTS_NAN).is_nan());
    }

    #[test]
    fn test_deg() {
        assert_eq!(deg(&0.0), "0");
        assert_eq!(deg(&PI), "deg(180.0000)");
    }
}
