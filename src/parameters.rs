//! Defines the Franka parameter data structure

pub mod franka_kinematics {
    use std::f64::consts::FRAC_PI_4;
    use crate::kinematic_traits::Joints;
    use crate::utils::deg;

    /// Distance from the flange to the tool center point of the Franka Hand.
    pub const HAND_LENGTH: f64 = 0.1034;

    /// Rotation of the Franka Hand frame about the flange z axis.
    pub const HAND_YAW: f64 = -FRAC_PI_4;

    /// What is mounted on the flange. The pose passed to the solver and returned by the
    /// forward kinematics is the pose of this end effector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EndEffector {
        /// Bare flange, the pose is the pose of the flange frame.
        Flange,
        /// Franka Hand, 0.1034 m further along the flange z axis and rotated by -45 degrees around it.
        Hand,
    }

    impl EndEffector {
        /// Offset along the flange z axis, in meters.
        pub fn length(&self) -> f64 {
            match self {
                EndEffector::Flange => 0.0,
                EndEffector::Hand => HAND_LENGTH,
            }
        }

        /// Rotation around the flange z axis, in radians.
        pub fn yaw(&self) -> f64 {
            match self {
                EndEffector::Flange => 0.0,
                EndEffector::Hand => HAND_YAW,
            }
        }

        pub fn name(&self) -> &'static str {
            match self {
                EndEffector::Flange => "flange",
                EndEffector::Hand => "hand",
            }
        }
    }

    /// Parameters for the kinematic model of the robot. See [parameters_robots.rs](parameters_robots.rs)
    /// for the concrete robot models. Link parameters follow the modified Denavit-Hartenberg
    /// convention published by Franka Emika.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// Height of the shoulder (joint 2 axis) above the base.
        pub d1: f64,

        /// Length of the upper arm, from the shoulder to the elbow offset.
        pub d3: f64,

        /// Length of the forearm, from the elbow offset to the wrist.
        pub d5: f64,

        /// Elbow offset, perpendicular to the upper arm and to the forearm.
        pub a4: f64,

        /// Offset of the joint 7 axis from the joint 6 axis.
        pub a7: f64,

        /// Distance from the joint 6 axis to the flange, along the joint 7 axis.
        pub d_flange: f64,

        /// Tool mounted on the flange.
        pub end_effector: EndEffector,

        /// Lower joint limits, inclusive.
        pub q_min: Joints,

        /// Upper joint limits, inclusive.
        pub q_max: Joints,
    }

    impl Parameters {
        /// Distance from the joint 6 axis to the end effector, along the joint 7 axis.
        pub fn d7e(&self) -> f64 {
            self.d_flange + self.end_effector.length()
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "franka_kinematics_geometric_parameters:\n  \
              d1: {}\n  \
              d3: {}\n  \
              d5: {}\n  \
              a4: {}\n  \
              a7: {}\n  \
              d_flange: {}\n\
            franka_kinematics_end_effector: {}\n\
            franka_kinematics_joint_limits:\n  \
              min: [{}]\n  \
              max: [{}]\n",
                self.d1,
                self.d3,
                self.d5,
                self.a4,
                self.a7,
                self.d_flange,
                self.end_effector.name(),
                self.q_min.iter().map(|x| deg(x))
                    .collect::<Vec<_>>().join(", "),
                self.q_max.iter().map(|x| deg(x))
                    .collect::<Vec<_>>().join(", "),
            )
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_end_effector_offsets() {
            assert_eq!(EndEffector::Flange.length(), 0.0);
            assert_eq!(EndEffector::Flange.yaw(), 0.0);
            assert_eq!(EndEffector::Hand.length(), 0.1034);
            assert_eq!(EndEffector::Hand.yaw(), -FRAC_PI_4);
        }

        #[test]
        fn test_d7e() {
            let panda = Parameters::panda();
            assert!((panda.d7e() - 0.2104).abs() < 1E-12);
            let flange = Parameters::panda_flange();
            assert!((flange.d7e() - 0.107).abs() < 1E-12);
        }

        #[test]
        fn test_to_yaml() {
            let yaml = Parameters::panda().to_yaml();
            assert!(yaml.contains("d1: 0.333"));
            assert!(yaml.contains("franka_kinematics_end_effector: hand"));
            assert!(yaml.contains("min: [deg(-166.0031)"), "{yaml}");
        }
    }
}
