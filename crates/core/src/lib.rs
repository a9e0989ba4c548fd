//! # SkelGis Core
//!
//! Core types, traits and errors for the SkelGis centerline library.
//!
//! This crate provides:
//! - `AreaInput`: tagged areal geometry, resolved once at pipeline entry
//! - `Feature` / `FeatureCollection`: vector feature carriers
//! - `Error` / `Result`: shared error handling
//! - Algorithm traits for consistent API

pub mod error;
pub mod geometry;
pub mod vector;

pub use error::{Error, Result};
pub use geometry::AreaInput;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::AreaInput;
    pub use crate::vector::{Feature, FeatureCollection};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in SkelGis.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
