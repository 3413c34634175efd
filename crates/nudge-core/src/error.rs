//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! `#[from]` variant, so a distribution failure raised deep inside a behavior
//! model still surfaces to the caller as a `CoreError::Distribution`.

use thiserror::Error;

/// The error type for `nudge-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid run configuration: quiet hours covering every tick, a zero
    /// step width, zero simulation weeks, …
    #[error("configuration error: {0}")]
    Config(String),

    /// Weights summed to zero (or were negative / not finite) when a
    /// distribution had to be normalized.
    #[error("cannot normalize weights {weights:?}: sum must be positive and finite")]
    Distribution { weights: Vec<f64> },

    /// A raw value fell outside the closed state vocabulary.
    #[error("state lookup error: {0}")]
    Lookup(String),
}

/// Shorthand result type for `nudge-core`.
pub type CoreResult<T> = Result<T, CoreError>;
