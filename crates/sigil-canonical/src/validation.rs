use thiserror::Error;

/// Rejected grid sizes and point text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text that is not an `x,y` pair, or a grid size that is not a power of two.
    #[error("malformed {field}: '{value}'")]
    Malformed {
        /// `point`, `x`, `y` or `grid_size`.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A coordinate past the packed nibble range, or a grid wider than 16 cells.
    #[error("{field} {value} does not fit on a sigil grid")]
    OutOfRange {
        /// `x`, `y` or `grid_size`.
        field: &'static str,
        /// The rejected value, in decimal.
        value: String,
    },
}
