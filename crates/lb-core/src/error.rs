//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so configuration problems surface unchanged at the builder.

use thiserror::Error;

/// Validation failures for lift-bank configuration and traffic input.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("departure threshold {0} is outside [0, 1]")]
    Threshold(f64),

    #[error("invalid kinematic parameter {name} = {value}: {reason}")]
    Kinematics {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },

    #[error("traffic record {index}: {reason}")]
    Traffic {
        index:  usize,
        reason: String,
    },
}

/// Shorthand result type for all `lb-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
