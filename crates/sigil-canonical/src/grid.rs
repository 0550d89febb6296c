use serde::{Deserialize, Serialize};

use crate::point;
use crate::validation::ValidationError;

/// Default side length of the sigil grid.
pub const GRID_SIZE: u8 = 4;

/// Largest supported grid. A packed point carries 4 bits per axis, so going
/// past 16 would need a wider point encoding and occurrence table.
pub const MAX_GRID_SIZE: u8 = 16;

/// Side length of a square sigil grid: a power of two in `[1, 16]`.
///
/// Producers and validators must agree on the grid size; keys canonicalized
/// under one grid are not comparable with keys from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridSize(u8);

impl GridSize {
    /// The default 4x4 grid.
    pub const DEFAULT: GridSize = GridSize(GRID_SIZE);

    /// Parses a validated grid size.
    pub fn new(size: u8) -> Result<Self, ValidationError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(ValidationError::OutOfRange {
                field: "grid_size",
                value: size.to_string(),
            });
        }
        if !size.is_power_of_two() {
            return Err(ValidationError::Malformed {
                field: "grid_size",
                value: size.to_string(),
            });
        }
        Ok(Self(size))
    }

    /// Side length of the grid.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of cells on the grid, which is also the size of the occurrence table.
    pub fn cell_count(self) -> usize {
        usize::from(self.0) * usize::from(self.0)
    }

    /// Returns true if the packed point lies on this grid.
    pub fn contains(self, packed: u8) -> bool {
        !point::is_out_of_grid(packed, self.0)
    }

    /// Reduces an in-grid packed point to a dense index in `[0, cell_count)`.
    ///
    /// The x bits are shifted down until they sit directly above the y bits,
    /// which is a perfect hash for every point the grid contains. The result
    /// is meaningless for out-of-grid points.
    pub fn compact_key(self, packed: u8) -> usize {
        let shift = point::X_SHIFT - self.0.trailing_zeros() as u8;
        usize::from((packed >> shift) | (packed & point::Y_MASK))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for GridSize {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GridSize> for u8 {
    fn from(value: GridSize) -> Self {
        value.0
    }
}
