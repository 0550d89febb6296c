//! Canonicalize command implementation.

use sigil_canonical::{encode_points, Canonicalizer};
use tracing::info;

use super::parse_points;
use crate::output;

pub fn run(
    canonicalizer: &Canonicalizer,
    points: Vec<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let points = parse_points(&points)?;

    let key = canonicalizer
        .canonicalize(&encode_points(&points))
        .ok_or("Sigil is not valid")?;
    info!(key = %key, "sigil canonicalized");

    if json_output {
        println!("{}", serde_json::to_string_pretty(&key)?);
    } else {
        output::print_key(&key);
    }
    Ok(())
}
