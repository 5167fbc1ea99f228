//! Error type for the simulation core.
//!
//! Only constructors and input handling can fail. The step pipeline itself is
//! infallible: coincident particles are a defined no-force, no-impulse case.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, GravSimError>;

#[derive(Debug, Error, PartialEq)]
pub enum GravSimError {
    /// Mass must be finite and strictly positive (force integration divides by it).
    #[error("invalid mass {0}: mass must be finite and > 0")]
    InvalidMass(f64),

    /// A user or configuration parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A position or velocity component is NaN or infinite.
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}
