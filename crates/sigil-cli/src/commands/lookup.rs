//! Lookup command implementation.

use sigil_canonical::Canonicalizer;
use sigil_registry::{PatternSource, SigilPattern, SigilRegistry};

use super::parse_points;

pub fn run(
    canonicalizer: &Canonicalizer,
    patterns: String,
    points: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = std::fs::read_to_string(&patterns)
        .map_err(|e| format!("Failed to read file {}: {}", patterns, e))?;
    let sources: Vec<PatternSource> =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid pattern file: {}", e))?;

    let loaded = sources
        .into_iter()
        .map(|source| source.build(canonicalizer))
        .collect::<Result<Vec<SigilPattern>, _>>()?;

    let registry = SigilRegistry::with_canonicalizer(*canonicalizer);
    registry.put_all(loaded)?;

    let drawn = parse_points(&points)?;
    let pattern = registry
        .lookup_points(&drawn)
        .ok_or("No pattern matches the drawing")?;

    println!("{}", pattern.id());
    Ok(())
}
