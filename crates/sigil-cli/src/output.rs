//! Output formatting utilities.

use sigil_canonical::{SigilKey, SigilPoint};

/// Formats points as `(x, y)` separated by spaces.
pub fn format_points(points: &[SigilPoint]) -> String {
    points
        .iter()
        .map(|point| format!("({})", point))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints a key as hex followed by its points.
pub fn print_key(key: &SigilKey) {
    println!("key:       {}", key);
    println!("points:    {}", format_points(&key.points()));
    if key.is_loop() {
        println!("shape:     loop");
    } else {
        println!("shape:     open");
    }
}
