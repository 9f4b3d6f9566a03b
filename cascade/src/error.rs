//! Error types for the failure simulator.

use thiserror::Error;

/// Errors surfaced by [`FailureSystem`](crate::FailureSystem) operations.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A probability was outside the closed interval [0.0, 1.0].
    #[error("probability {value} is outside [0.0, 1.0]")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },

    /// A component name was not present in the registry.
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// A topology document could not be decoded or encoded.
    #[error("topology codec error: {0}")]
    TopologyCodec(#[from] serde_json::Error),
}

/// A type alias for `Result<T, SimulationError>`.
pub type SimulationResult<T> = Result<T, SimulationError>;
