//! Error types for circuit transient simulation.

use std::fmt;

/// Errors raised by circuit validation and trajectory packaging.
///
/// Running out of sample buffer is not an error: the trajectory is returned
/// truncated and flagged (see [`Trajectory::is_truncated`](super::Trajectory::is_truncated)).
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// A circuit or simulation parameter is out of range.
    InvalidParameter {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Error while serializing a trajectory package.
    SerializationError {
        /// Underlying serializer message.
        message: String,
    },

    /// Error while deserializing a trajectory package.
    DeserializationError {
        /// Underlying deserializer message.
        message: String,
    },

    /// Stored checksum does not match the package payload.
    ChecksumMismatch {
        /// Checksum carried by the package.
        expected: String,
        /// Checksum recomputed from the payload.
        actual: String,
    },

    /// Package was written with an unknown format version.
    UnsupportedVersion {
        /// Version found in the package.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::InvalidParameter { message } => {
                write!(f, "invalid circuit parameter: {message}")
            }
            CircuitError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            CircuitError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            CircuitError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            CircuitError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported trajectory package version {found} (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for CircuitError {}
