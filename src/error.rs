//! Error types for hex island generation

use thiserror::Error;

/// Errors that can occur while configuring or running the terrain pipeline
///
/// The algorithms themselves are total; every variant here is raised at a
/// boundary (configuration or a caller-supplied hex slice), never mid-stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A hex slice does not match the grid it is being processed against
    #[error("grid mismatch: expected {expected} hexes, got {actual}")]
    GridMismatch {
        /// Hex count implied by the grid dimensions
        expected: usize,
        /// Length of the slice that was passed in
        actual: usize,
    },
}

/// Result type alias for terrain operations
pub type Result<T> = std::result::Result<T, TerrainError>;
