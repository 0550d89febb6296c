//! Named sigil patterns.
//!
//! A pattern is an asset loaded from JSON:
//!
//! ```json
//! { "id": "ward", "points": ["0, 0", "0, 1", "1, 1"] }
//! ```
//!
//! Its canonical key is computed when the pattern is built, so a pattern that
//! exists is always valid.

use serde::{Deserialize, Serialize};
use sigil_canonical::{
    encode_points, Canonicalizer, SigilKey, SigilPoint, MAX_SIGIL_LENGTH, MIN_SIGIL_LENGTH,
};
use tracing::debug;

use crate::error::PatternError;

/// Unvalidated form of a pattern, as it appears on disk.
///
/// Deserialize into this when the pattern must be validated against a grid
/// other than the default one, then call [`PatternSource::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSource {
    /// Pattern id.
    pub id: String,
    /// Points in drawing order.
    pub points: Option<Vec<SigilPoint>>,
}

impl PatternSource {
    /// Validates the source with `canonicalizer`.
    pub fn build(self, canonicalizer: &Canonicalizer) -> Result<SigilPattern, PatternError> {
        let points = self
            .points
            .ok_or_else(|| PatternError::MissingPoints { id: self.id.clone() })?;
        SigilPattern::with_canonicalizer(canonicalizer, self.id, points)
    }
}

/// A named drawing together with its canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatternSource")]
pub struct SigilPattern {
    id: String,
    points: Vec<SigilPoint>,
    #[serde(skip_serializing)]
    key: SigilKey,
}

impl SigilPattern {
    /// Builds a pattern validated on the default grid.
    pub fn new(id: impl Into<String>, points: Vec<SigilPoint>) -> Result<Self, PatternError> {
        Self::with_canonicalizer(&Canonicalizer::default(), id, points)
    }

    /// Builds a pattern validated by `canonicalizer`.
    pub fn with_canonicalizer(
        canonicalizer: &Canonicalizer,
        id: impl Into<String>,
        points: Vec<SigilPoint>,
    ) -> Result<Self, PatternError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PatternError::EmptyId);
        }

        if !(MIN_SIGIL_LENGTH..=MAX_SIGIL_LENGTH).contains(&points.len()) {
            return Err(PatternError::Length {
                id,
                len: points.len(),
                min: MIN_SIGIL_LENGTH,
                max: MAX_SIGIL_LENGTH,
            });
        }

        // Coordinates past the packed range would alias after encoding.
        let grid = canonicalizer.grid().get();
        if points.iter().any(|p| p.x >= grid || p.y >= grid) {
            return Err(PatternError::NotCanonical { id });
        }

        let key = match canonicalizer.canonicalize(&encode_points(&points)) {
            Some(key) => key,
            None => return Err(PatternError::NotCanonical { id }),
        };
        debug!(id = %id, key = %key, "sigil pattern loaded");

        Ok(Self { id, points, key })
    }

    /// Pattern id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Points in the order they were authored.
    pub fn points(&self) -> &[SigilPoint] {
        &self.points
    }

    /// Canonical key of the pattern's drawing.
    pub fn sigil_key(&self) -> &SigilKey {
        &self.key
    }
}

impl TryFrom<PatternSource> for SigilPattern {
    type Error = PatternError;

    fn try_from(source: PatternSource) -> Result<Self, Self::Error> {
        source.build(&Canonicalizer::default())
    }
}
