//! Error types for patterns and the registry.

use thiserror::Error;

/// Errors raised while building a [`SigilPattern`](crate::SigilPattern).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern has no id.
    #[error("sigil pattern id must not be empty")]
    EmptyId,
    /// The pattern carried no points.
    #[error("sigil pattern {id:?}: points are missing")]
    MissingPoints {
        /// Pattern id.
        id: String,
    },
    /// The pattern has too few or too many points.
    #[error("sigil pattern {id:?}: expected {min} to {max} points, got {len}")]
    Length {
        /// Pattern id.
        id: String,
        /// Number of points supplied.
        len: usize,
        /// Fewest points allowed.
        min: usize,
        /// Most points allowed.
        max: usize,
    },
    /// The points do not form a valid sigil.
    #[error("sigil pattern {id:?}: points do not form a valid sigil")]
    NotCanonical {
        /// Pattern id.
        id: String,
    },
}

/// Errors raised by [`SigilRegistry`](crate::SigilRegistry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same id appears more than once in one batch.
    #[error("duplicate sigil pattern id {0:?}")]
    DuplicateId(String),
}
