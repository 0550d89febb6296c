//! Command implementations.

pub mod canonicalize;
pub mod lookup;
pub mod verify;

use sigil_canonical::SigilPoint;

/// Parses command-line points of the form `"x,y"`.
pub fn parse_points(raw: &[String]) -> Result<Vec<SigilPoint>, String> {
    raw.iter()
        .map(|text| {
            text.parse::<SigilPoint>()
                .map_err(|e| format!("Invalid point {:?}: {}", text, e))
        })
        .collect()
}
