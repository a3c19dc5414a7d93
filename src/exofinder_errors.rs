use thiserror::Error;

use crate::constants::Radian;

#[derive(Error, Debug)]
pub enum ExofinderError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Also raised when the solved orbital state is not finite (e.g. `e ≥ 1`).
    #[error("Failed to solve Kepler's equation given the input.")]
    KeplerNotConverged {
        mean_anomaly: Radian,
        eccentricity: f64,
    },

    #[error("Cannot build a point cloud from an empty batch")]
    EmptyBatch,

    #[error("Body has no solved position: {0}")]
    UnsolvedBody(String),

    #[error("Invalid server parameter: {0}")]
    InvalidServerParameter(String),

    #[error("Unable to read the system clock: {0}")]
    SystemClock(String),

    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    #[error("Unable to perform I/O operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PartialEq for ExofinderError {
    fn eq(&self, other: &Self) -> bool {
        use ExofinderError::*;
        match (self, other) {
            (MalformedRequest(a), MalformedRequest(b)) => a == b,
            (
                KeplerNotConverged {
                    mean_anomaly: m1,
                    eccentricity: e1,
                },
                KeplerNotConverged {
                    mean_anomaly: m2,
                    eccentricity: e2,
                },
            ) => m1.to_bits() == m2.to_bits() && e1.to_bits() == e2.to_bits(),
            (UnsolvedBody(a), UnsolvedBody(b)) => a == b,
            (InvalidServerParameter(a), InvalidServerParameter(b)) => a == b,
            (SystemClock(a), SystemClock(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,

            // Not comparable: equal when the variant matches
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            (EmptyBatch, EmptyBatch) => true,

            _ => false,
        }
    }
}
