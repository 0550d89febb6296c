//! Packing of grid coordinates into single bytes.
//!
//! A packed point keeps `x` in the high nibble and `y` in the low nibble.
//! Packing never validates; range checks belong to the canonicalizer.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

pub(crate) const X_SHIFT: u8 = 4;
pub(crate) const X_MASK: u8 = 0xF0;
pub(crate) const Y_MASK: u8 = 0x0F;

/// Largest coordinate a packed point can represent on either axis.
pub const MAX_COORDINATE: u8 = 0x0F;

/// Packs a coordinate pair into one byte.
///
/// Only the low 4 bits of each coordinate survive, so every input produces a
/// deterministic byte. Out-of-grid points are rejected later, during
/// canonicalization.
pub fn encode(x: u32, y: u32) -> u8 {
    let x = (x & u32::from(Y_MASK)) as u8;
    let y = (y & u32::from(Y_MASK)) as u8;
    ((x << X_SHIFT) & X_MASK) | y
}

/// Unpacks a byte into its `(x, y)` coordinates.
pub fn decode(packed: u8) -> (u8, u8) {
    ((packed & X_MASK) >> X_SHIFT, packed & Y_MASK)
}

/// Returns true if either coordinate of `packed` is `>= grid_size`.
pub fn is_out_of_grid(packed: u8, grid_size: u8) -> bool {
    let (x, y) = decode(packed);
    x >= grid_size || y >= grid_size
}

/// Returns true if `b` is one king-move away from `a`. Identical points are not adjacent.
pub fn is_step(a: u8, b: u8) -> bool {
    let (ax, ay) = decode(a);
    let (bx, by) = decode(b);
    a != b && ax.abs_diff(bx) <= 1 && ay.abs_diff(by) <= 1
}

/// Packs a slice of points, preserving order.
pub fn encode_points(points: &[SigilPoint]) -> Vec<u8> {
    points.iter().map(|point| point.encode()).collect()
}

/// Unpacks a slice of bytes, preserving order.
pub fn decode_points(packed: &[u8]) -> Vec<SigilPoint> {
    packed.iter().copied().map(SigilPoint::decode).collect()
}

/// A single cell on the sigil grid; `(0, 0)` is the upper-left corner.
///
/// The text form is `"x, y"`, which is also how points appear in pattern files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SigilPoint {
    /// Column, increasing to the right.
    pub x: u8,
    /// Row, increasing downward.
    pub y: u8,
}

impl SigilPoint {
    /// Creates a point without validation.
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Packs this point, see [`encode`].
    pub fn encode(self) -> u8 {
        encode(self.x.into(), self.y.into())
    }

    /// Unpacks a point, see [`decode`].
    pub fn decode(packed: u8) -> Self {
        let (x, y) = decode(packed);
        Self { x, y }
    }

    /// Returns true if `other` is one of the eight neighbouring cells.
    pub fn is_adjacent_to(self, other: SigilPoint) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for SigilPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl FromStr for SigilPoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^[ \t]*([0-9]{1,3})[ \t]*,[ \t]*([0-9]{1,3})[ \t]*$")
            .expect("invalid regex");
        let captures = re.captures(s).ok_or_else(|| ValidationError::Malformed {
            field: "point",
            value: s.to_string(),
        })?;
        let x = parse_coordinate("x", &captures[1])?;
        let y = parse_coordinate("y", &captures[2])?;
        Ok(Self { x, y })
    }
}

fn parse_coordinate(field: &'static str, digits: &str) -> Result<u8, ValidationError> {
    // At most three digits, so this always fits.
    let value: u16 = digits.parse().map_err(|_| ValidationError::Malformed {
        field,
        value: digits.to_string(),
    })?;
    if value > u16::from(MAX_COORDINATE) {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as u8)
}

impl TryFrom<String> for SigilPoint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SigilPoint> for String {
    fn from(value: SigilPoint) -> Self {
        value.to_string()
    }
}
