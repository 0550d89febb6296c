//! Pattern assets and input capture on top of `sigil-canonical`.
//!
//! This crate provides:
//! - `SigilPattern`, a named drawing validated once and keyed by its canonical form
//! - `SigilRegistry`, which resolves a drawn sigil to the pattern it matches
//! - `KeyCache`, an explicit single-assignment cache of derived keys
//! - `SigilDraw`, the state of one drawing in progress
//!
//! Matching a drawing never compares points directly: both sides are
//! canonicalized and the resulting keys are looked up in a hash map.

#![deny(missing_docs)]

/// Single-assignment cache of canonical keys.
pub mod cache;
/// Capture of an in-progress drawing.
pub mod draw;
/// Error types for patterns and the registry.
pub mod error;
/// Named sigil patterns.
pub mod pattern;
/// Key to pattern lookup.
pub mod registry;

pub use cache::KeyCache;
pub use draw::{DrawStep, SigilDraw};
pub use error::{PatternError, RegistryError};
pub use pattern::{PatternSource, SigilPattern};
pub use registry::SigilRegistry;
