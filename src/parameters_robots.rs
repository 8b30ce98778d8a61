//! Hardcoded Franka parameters for the supported robots

pub mod franka_kinematics {
    use crate::parameters::franka_kinematics::{EndEffector, Parameters};

    #[allow(dead_code)]
    impl Parameters {
        /// Franka Emika Panda with the Franka Hand mounted.
        /// See https://frankaemika.github.io/docs/control_parameters.html
        pub fn panda() -> Self {
            Parameters {
                d1: 0.333,
                d3: 0.316,
                d5: 0.384,
                a4: 0.0825,
                a7: 0.088,
                d_flange: 0.107,
                end_effector: EndEffector::Hand,
                q_min: [-2.8973, -1.7628, -2.8973, -3.0718, -2.8973, -0.0175, -2.8973],
                q_max: [2.8973, 1.7628, 2.8973, -0.0698, 2.8973, 3.7525, 2.8973],
            }
        }

        /// Franka Emika Panda, pose refers to the bare flange.
        pub fn panda_flange() -> Self {
            Parameters {
                end_effector: EndEffector::Flange,
                ..Self::panda()
            }
        }

        /// Franka Research 3 with the Franka Hand mounted. The link geometry is the same as
        /// Panda, only the joint limits differ.
        pub fn fr3() -> Self {
            Parameters {
                q_min: [-2.7437, -1.7837, -2.9007, -3.0421, -2.8065, 0.5445, -3.0159],
                q_max: [2.7437, 1.7837, 2.9007, -0.1518, 2.8065, 4.5169, 3.0159],
                ..Self::panda()
            }
        }

        /// Franka Research 3, pose refers to the bare flange.
        pub fn fr3_flange() -> Self {
            Parameters {
                end_effector: EndEffector::Flange,
                ..Self::fr3()
            }
        }

        /// The same robot with another end effector.
        pub fn with_end_effector(self, end_effector: EndEffector) -> Self {
            Parameters { end_effector, ..self }
        }
    }
}
