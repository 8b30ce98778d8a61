#[cfg(test)]
mod tests {
    use crate::kinematic_traits::Kinematics;
    use crate::kinematics_impl::FrankaKinematics;
    use crate::parameter_error::ParameterError;
    use crate::parameters::franka_kinematics::{EndEffector, Parameters};

    const READ_ERROR: &'static str = "Failed to load parameters from file";

    #[test]
    fn test_parameters_from_yaml() {
        let filename = "src/tests/data/panda.yaml";
        let loaded = Parameters::from_yaml_file(filename).expect(READ_ERROR);
        assert_eq!(loaded, Parameters::panda());
    }

    #[test]
    fn test_parameters_from_yaml_degrees() {
        let filename = "src/tests/data/fr3_flange.yaml";
        let loaded = Parameters::from_yaml_file(filename).expect(READ_ERROR);
        let expected = Parameters::fr3_flange();

        assert_eq!(expected.d1, loaded.d1);
        assert_eq!(expected.d3, loaded.d3);
        assert_eq!(expected.d5, loaded.d5);
        assert_eq!(expected.a4, loaded.a4);
        assert_eq!(expected.a7, loaded.a7);
        assert_eq!(expected.d_flange, loaded.d_flange);
        assert_eq!(EndEffector::Flange, loaded.end_effector);
        assert_eq!(loaded.q_max[0], 157.2_f64.to_radians());
        assert_eq!(loaded.q_min[4], (-160.8_f64).to_radians());
        for joint in 0..7 {
            // FR3 limits are given in radians with 4 decimals
            assert!((expected.q_min[joint] - loaded.q_min[joint]).abs() < 1E-4);
            assert!((expected.q_max[joint] - loaded.q_max[joint]).abs() < 1E-4);
        }
    }

    #[test]
    fn test_loaded_parameters_solve() {
        let loaded = Parameters::from_yaml_file("src/tests/data/panda.yaml").expect(READ_ERROR);
        let robot = FrankaKinematics::new(loaded);
        let joints = [0.1, 0.2, 0.3, -1.5, 0.4, 1.5, 0.6];
        let solution = robot.inverse_case_consistent(&robot.forward(&joints), joints[6], &joints);
        for j in 0..7 {
            assert!((solution[j] - joints[j]).abs() < 1E-6, "{:?}", solution);
        }
    }

    #[test]
    fn test_invalid_limits() {
        match Parameters::from_yaml_file("src/tests/data/invalid_limits.yaml") {
            Err(ParameterError::InvalidLimits { joint, min, max }) => {
                assert_eq!(joint, 3);
                assert_eq!(min, -0.0698);
                assert_eq!(max, -3.0718);
            }
            other => panic!("Expected invalid limits, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_length() {
        assert!(matches!(Parameters::from_yaml_file("src/tests/data/invalid_length.yaml"),
            Err(ParameterError::InvalidLength { expected: 7, found: 6 })));
    }

    #[test]
    fn test_missing_field() {
        match Parameters::from_yaml_file("src/tests/data/missing_field.yaml") {
            Err(ParameterError::MissingField(field)) => {
                assert_eq!(field, "franka_kinematics_geometric_parameters.d5");
            }
            other => panic!("Expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_angle() {
        assert!(matches!(Parameters::from_yaml_file("src/tests/data/wrong_angle.yaml"),
            Err(ParameterError::WrongAngle(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(Parameters::from_yaml_file("src/tests/data/no_such_robot.yaml"),
            Err(ParameterError::IoError(_))));
    }
}
