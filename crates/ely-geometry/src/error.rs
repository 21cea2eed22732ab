//! Error types for the geometry crate.

use thiserror::Error;

/// Errors raised by strict geometry validation and collision configuration.
///
/// The geometry queries themselves never fail; these errors only come from
/// opt-in checks.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// A sphere radius was negative or not finite.
    #[error("invalid sphere radius: {radius}")]
    InvalidRadius { radius: f64 },

    /// A collision configuration value is out of range.
    #[error("invalid collision config: {0}")]
    InvalidConfig(String),

    /// A collision configuration document could not be parsed.
    #[error("failed to parse collision config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
