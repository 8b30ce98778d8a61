//! Supports extracting Franka parameters from YAML file (optional)

use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

use crate::kinematic_traits::Joints;
use crate::parameter_error::ParameterError;
use crate::parameters::franka_kinematics::{EndEffector, Parameters};

const GEOMETRY: &str = "franka_kinematics_geometric_parameters";
const END_EFFECTOR: &str = "franka_kinematics_end_effector";
const LIMITS: &str = "franka_kinematics_joint_limits";

impl Parameters {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Franka Research 3 with the Franka Hand
    /// franka_kinematics_geometric_parameters:
    ///   d1: 0.333
    ///   d3: 0.316
    ///   d5: 0.384
    ///   a4: 0.0825
    ///   a7: 0.088
    ///   d_flange: 0.107
    /// franka_kinematics_end_effector: hand
    /// franka_kinematics_joint_limits:
    ///   min: [deg(-157.2), -1.7837, -2.9007, -3.0421, -2.8065, 0.5445, -3.0159]
    ///   max: [deg(157.2), 1.7837, 2.9007, -0.1518, 2.8065, 4.5169, 3.0159]
    /// ```
    /// Every section is optional and defaults to Franka Emika Panda with the hand.
    /// Angles are in radians, or in degrees when written as deg(angle).
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Same as [`Parameters::from_yaml_file`], from the YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let doc = docs.first()
            .ok_or_else(|| ParameterError::ParseError("empty YAML document".to_string()))?;

        let mut parameters = Parameters::panda();

        let gp = &doc[GEOMETRY];
        if !gp.is_badvalue() {
            parameters.d1 = read_length(gp, "d1")?;
            parameters.d3 = read_length(gp, "d3")?;
            parameters.d5 = read_length(gp, "d5")?;
            parameters.a4 = read_length(gp, "a4")?;
            parameters.a7 = read_length(gp, "a7")?;
            parameters.d_flange = read_length(gp, "d_flange")?;
        }

        match &doc[END_EFFECTOR] {
            Yaml::BadValue => {}
            Yaml::String(name) => parameters.end_effector = parse_end_effector(name)?,
            other => return Err(ParameterError::ParseError(
                format!("{} must be 'hand' or 'flange', got {:?}", END_EFFECTOR, other))),
        }

        let limits = &doc[LIMITS];
        if !limits.is_badvalue() {
            parameters.q_min = read_joints(&limits["min"], &format!("{}.min", LIMITS))?;
            parameters.q_max = read_joints(&limits["max"], &format!("{}.max", LIMITS))?;
        }
        for joint in 0..7 {
            let (min, max) = (parameters.q_min[joint], parameters.q_max[joint]);
            if min > max {
                return Err(ParameterError::InvalidLimits { joint, min, max });
            }
        }

        Ok(parameters)
    }
}

fn parse_end_effector(name: &str) -> Result<EndEffector, ParameterError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "hand" => Ok(EndEffector::Hand),
        "flange" | "none" => Ok(EndEffector::Flange),
        _ => Err(ParameterError::ParseError(
            format!("{} must be 'hand' or 'flange', got '{}'", END_EFFECTOR, name))),
    }
}

fn read_length(section: &Yaml, name: &str) -> Result<f64, ParameterError> {
    let field = format!("{}.{}", GEOMETRY, name);
    let value = &section[name];
    if value.is_badvalue() {
        return Err(ParameterError::MissingField(field));
    }
    let length = number(value).ok_or_else(|| ParameterError::ParseError(
        format!("{} must be a number, got {:?}", field, value)))?;
    if !length.is_finite() {
        return Err(ParameterError::NotFinite(field));
    }
    Ok(length)
}

fn read_joints(value: &Yaml, field: &str) -> Result<Joints, ParameterError> {
    let items = match value {
        Yaml::BadValue => return Err(ParameterError::MissingField(field.to_string())),
        Yaml::Array(items) => items,
        other => return Err(ParameterError::ParseError(
            format!("{} must be a list, got {:?}", field, other))),
    };
    if items.len() != 7 {
        return Err(ParameterError::InvalidLength { expected: 7, found: items.len() });
    }
    let mut joints = [0.0; 7];
    for (i, item) in items.iter().enumerate() {
        let angle = angle(item)?;
        if !angle.is_finite() {
            return Err(ParameterError::NotFinite(format!("{}[{}]", field, i)));
        }
        joints[i] = angle;
    }
    Ok(joints)
}

fn number(value: &Yaml) -> Option<f64> {
    match value {
        Yaml::Real(text) => text.parse::<f64>().ok(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

/// Angle in radians, or deg(angle) in degrees.
fn angle(value: &Yaml) -> Result<f64, ParameterError> {
    if let Some(radians) = number(value) {
        return Ok(radians);
    }
    let Yaml::String(text) = value else {
        return Err(ParameterError::WrongAngle(format!("{:?}", value)));
    };
    let text = text.trim();
    if text == "0" {
        return Ok(0.0);
    }
    text.strip_prefix("deg(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|inner| inner.trim().parse::<f64>().ok())
        .map(f64::to_radians)
        .ok_or_else(|| ParameterError::WrongAngle(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_forms() {
        assert_eq!(angle(&Yaml::Real("0.5".to_string())).unwrap(), 0.5);
        assert_eq!(angle(&Yaml::Integer(-1)).unwrap(), -1.0);
        let d = angle(&Yaml::String("deg(-90.0)".to_string())).unwrap();
        assert!((d + std::f64::consts::FRAC_PI_2).abs() < 1E-12);
        assert!(matches!(angle(&Yaml::String("rad(1)".to_string())), Err(ParameterError::WrongAngle(_))));
    }

    #[test]
    fn test_empty_sections_give_panda() {
        let loaded = Parameters::from_yaml_str("unrelated: 1\n").expect("defaults");
        assert_eq!(loaded, Parameters::panda());
    }

    #[test]
    fn test_to_yaml_reads_back() {
        let fr3 = Parameters::fr3_flange();
        let loaded = Parameters::from_yaml_str(&fr3.to_yaml()).expect("round trip of to_yaml");
        assert_eq!(loaded.d1, fr3.d1);
        assert_eq!(loaded.end_effector, EndEffector::Flange);
        for i in 0..7 {
            // deg() keeps 4 decimals of a degree
            assert!((loaded.q_min[i] - fr3.q_min[i]).abs() < 1E-5);
            assert!((loaded.q_max[i] - fr3.q_max[i]).abs() < 1E-5);
        }
    }

    #[test]
    fn test_unknown_end_effector() {
        let err = Parameters::from_yaml_str("franka_kinematics_end_effector: gripper\n").unwrap_err();
        assert!(err.to_string().contains("must be 'hand' or 'flange'"), "{err}");
    }
}
