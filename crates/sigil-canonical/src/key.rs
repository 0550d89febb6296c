use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canonicalizer::{canonicalize, MIN_SIGIL_LENGTH};
use crate::point::SigilPoint;

/// Error returned when persisted key bytes cannot be turned back into a key.
///
/// Either case means the stored data was corrupted or tampered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PersistedKeyError {
    /// The persisted form carried no points at all.
    #[error("invalid persisted sigil key: points are missing")]
    MissingPoints,
    /// The persisted points do not form a valid sigil.
    #[error("invalid persisted sigil key: points could not be canonicalized")]
    NotCanonical,
}

/// Canonical form of a validated sigil, suitable as a map key.
///
/// Equal shapes produce equal keys. Ordering is the unsigned lexicographic
/// order of the packed points; hashing covers the same bytes.
///
/// There is no way to build a key from arbitrary bytes: keys come from
/// [`Canonicalizer::canonicalize`](crate::Canonicalizer::canonicalize) or from
/// [`SigilKey::revalidate`], which runs the full canonicalization again.
/// Serialization goes through a proxy holding only the packed points, and
/// deserialization revalidates them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "KeyProxy", try_from = "KeyProxy")]
pub struct SigilKey {
    points: Box<[u8]>,
}

impl SigilKey {
    pub(crate) fn from_canonical(points: Vec<u8>) -> Self {
        Self {
            points: points.into_boxed_slice(),
        }
    }

    /// Canonicalizes untrusted bytes on the default grid and keeps the result.
    pub fn revalidate(untrusted: &[u8]) -> Result<Self, PersistedKeyError> {
        canonicalize(untrusted).ok_or(PersistedKeyError::NotCanonical)
    }

    /// Packed points in canonical order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.points
    }

    /// Unpacked points in canonical order.
    pub fn points(&self) -> Vec<SigilPoint> {
        crate::point::decode_points(&self.points)
    }

    /// Returns true if the sigil ends where it started.
    pub fn is_loop(&self) -> bool {
        self.points.first() == self.points.last()
    }

    /// Best-effort check that this key is in canonical order.
    ///
    /// `false` means the key is definitely not canonical. `true` does not
    /// prove validity. Never `false` for a key produced by canonicalization.
    pub fn looks_canonical(&self) -> bool {
        let points = &self.points;
        if points.len() < MIN_SIGIL_LENGTH {
            return false;
        }

        for (i, &first) in points.iter().enumerate() {
            for (j, &second) in points.iter().enumerate().skip(i + 3) {
                if first == second && points[i + 1] > points[j - 1] {
                    return false;
                }
            }
        }
        true
    }
}

impl AsRef<[u8]> for SigilKey {
    fn as_ref(&self) -> &[u8] {
        &self.points
    }
}

impl fmt::Display for SigilKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.points))
    }
}

impl fmt::Debug for SigilKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigilKey({self})")
    }
}

/// Wire form of a [`SigilKey`]: the packed points and nothing else.
#[derive(Serialize, Deserialize)]
struct KeyProxy {
    points: Option<Vec<u8>>,
}

impl From<SigilKey> for KeyProxy {
    fn from(key: SigilKey) -> Self {
        Self {
            points: Some(key.points.into_vec()),
        }
    }
}

impl TryFrom<KeyProxy> for SigilKey {
    type Error = PersistedKeyError;

    fn try_from(proxy: KeyProxy) -> Result<Self, Self::Error> {
        let untrusted = proxy.points.ok_or(PersistedKeyError::MissingPoints)?;
        SigilKey::revalidate(&untrusted)
    }
}
