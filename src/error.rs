//! Error types for planet generation

use thiserror::Error;

/// Errors that can occur during planet generation or queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanetError {
    /// An argument was outside its valid domain (degree, scale, gradient stops, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The triangle mesh is not a closed 2-manifold; indicates a construction bug
    #[error("mesh topology violated: {0}")]
    TopologyViolation(String),
    /// Requested tile ID does not exist
    #[error("tile not found: {0}")]
    TileNotFound(usize),
    /// Writing a debug image failed
    #[error("export failed: {0}")]
    Export(String),
}

/// Result type alias for planet operations
pub type Result<T> = std::result::Result<T, PlanetError>;
