//! Sigil validation and canonicalization primitives.
//!
//! A sigil is a path traced across a small square grid, stored as a sequence
//! of packed points. This crate decides whether a sigil is a legal drawing
//! and, if so, rewrites it into a canonical form so that every drawing of the
//! same shape maps to one [`SigilKey`]. Keys are cheap to hash and compare,
//! which turns pattern matching into a map lookup.
//!
//! Everything here is pure and synchronous; no call performs I/O or touches
//! shared state.
//!
#![deny(missing_docs)]

/// Canonicalization of packed sigils.
pub mod canonicalizer;
/// Grid size configuration.
pub mod grid;
/// The canonical key and its persisted form.
pub mod key;
/// Point packing and the text form of grid points.
pub mod point;
/// Validation errors for configuration and point text.
pub mod validation;

pub use canonicalizer::{canonicalize, Canonicalizer, MAX_SIGIL_LENGTH, MIN_SIGIL_LENGTH};
pub use grid::{GridSize, GRID_SIZE, MAX_GRID_SIZE};
pub use key::{PersistedKeyError, SigilKey};
pub use point::{decode, decode_points, encode, encode_points, is_out_of_grid, SigilPoint};
pub use validation::ValidationError;
