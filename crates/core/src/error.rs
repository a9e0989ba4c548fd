//! Error types for SkelGis

use thiserror::Error;

/// Main error type for SkelGis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("Degenerate site set: {count} distinct boundary sites (at least 4 required)")]
    DegenerateSiteSet { count: usize },

    #[error("Numeric instability: {0}")]
    NumericInstability(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for an `InvalidGeometry` error
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Error::InvalidGeometry { reason: reason.into() }
    }
}

/// Result type alias for SkelGis operations
pub type Result<T> = std::result::Result<T, Error>;
