//! Error handling for parameter extractors and flat array entry points

use std::io;

/// Unified error to report malformed input: wrong length of a flat array passed to
/// the solver, or failures while reading robot parameters from YAML.
/// Unreachable poses are not errors, they are reported as NaN solutions.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    WrongAngle(String),
    InvalidLength { expected: usize, found: usize },
    NotFinite(String),
    InvalidLimits { joint: usize, min: f64, max: f64 },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::WrongAngle(ref msg) =>
                write!(f, "Wrong angle representation: {}", msg),
            ParameterError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::NotFinite(ref field) =>
                write!(f, "Value must be finite: {}", field),
            ParameterError::InvalidLimits { joint, min, max } =>
                write!(f, "Invalid limits of joint {}: min {} is above max {}", joint + 1, min, max),
        }
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParameterError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_message() {
        let err = ParameterError::InvalidLength { expected: 16, found: 12 };
        assert_eq!(err.to_string(), "Invalid Length: expected 16, found 12");
    }

    #[test]
    fn test_invalid_limits_message_counts_joints_from_one() {
        let err = ParameterError::InvalidLimits { joint: 3, min: 1.0, max: -1.0 };
        assert_eq!(err.to_string(), "Invalid limits of joint 4: min 1 is above max -1");
    }

    #[test]
    fn test_io_error_is_source() {
        let err: ParameterError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
