//! Error types for particle-sphere.
//!
//! Only construction can fail: a field is either built from a valid
//! configuration or not built at all. Stepping never returns an error.

use std::fmt;

/// Errors that can occur while building a particle field or loading its
/// configuration.
#[derive(Debug)]
pub enum FieldError {
    /// Particle count must be at least one.
    InvalidParticleCount(usize),
    /// A numeric configuration value is non-finite or out of range.
    InvalidParameter {
        /// Configuration field name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Failed to parse or serialize a JSON configuration.
    Parse(serde_json::Error),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidParticleCount(count) => {
                write!(f, "Invalid particle count {}: at least one particle is required", count)
            }
            FieldError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for `{}`: {}", name, value)
            }
            FieldError::Io(e) => write!(f, "Failed to access configuration file: {}", e),
            FieldError::Parse(e) => write!(f, "Failed to parse configuration: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Io(e) => Some(e),
            FieldError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FieldError {
    fn from(e: std::io::Error) -> Self {
        FieldError::Io(e)
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::Parse(e)
    }
}
