//! Checksum-validated export of a finished trajectory.

use super::circuit::CircuitSpec;
use super::error::CircuitError;
use super::trajectory::Trajectory;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

/// Format version used for checksum-enabled trajectory packages.
pub const TRAJECTORY_PACKAGE_FORMAT_VERSION: u32 = 1;

/// Circuit and trajectory payload covered by the checksum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPayload {
    /// Circuit that produced the trajectory.
    pub spec: CircuitSpec,
    /// Recorded trajectory.
    pub trajectory: Trajectory,
}

/// Wrapper that provides checksum validation for a simulated trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryPackage {
    /// Version of the package schema.
    pub version: u32,
    /// Package payload.
    pub payload: TrajectoryPayload,
    /// Hex-encoded SHA-256 of the serialized payload.
    pub checksum: String,
}

impl TrajectoryPackage {
    /// Creates a package computing the checksum of `spec` and `trajectory`.
    pub fn new(spec: CircuitSpec, trajectory: Trajectory) -> Result<Self, CircuitError> {
        let payload = TrajectoryPayload { spec, trajectory };
        let checksum = Self::compute_checksum(&payload)?;
        trace!("packaged {} samples, checksum {}", payload.trajectory.len(), checksum);

        Ok(Self {
            version: TRAJECTORY_PACKAGE_FORMAT_VERSION,
            payload,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, CircuitError> {
        serde_json::to_string(self).map_err(|error| CircuitError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON without validating it.
    pub fn from_json(data: &str) -> Result<Self, CircuitError> {
        serde_json::from_str(data).map_err(|error| CircuitError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the version and checksum.
    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.version != TRAJECTORY_PACKAGE_FORMAT_VERSION {
            return Err(CircuitError::UnsupportedVersion {
                found: self.version,
                expected: TRAJECTORY_PACKAGE_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.payload)?;
        if computed != self.checksum {
            return Err(CircuitError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated trajectory.
    pub fn into_trajectory(self) -> Result<Trajectory, CircuitError> {
        self.validate()?;
        Ok(self.payload.trajectory)
    }

    fn compute_checksum(payload: &TrajectoryPayload) -> Result<String, CircuitError> {
        let bytes =
            serde_json::to_vec(payload).map_err(|error| CircuitError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(bytes);

        let checksum_bytes = hasher.finalize();
        Ok(format!("{:x}", checksum_bytes))
    }
}
