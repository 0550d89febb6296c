//! Verify command implementation.

use sigil_canonical::{Canonicalizer, PersistedKeyError};
use serde_json::{json, Value};
use std::io::{self, Read};

use crate::output;

pub fn run(
    canonicalizer: &Canonicalizer,
    input: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Read JSON from file or stdin
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let stored: Vec<u8> = match value.get("points") {
        None | Some(Value::Null) => return Err(PersistedKeyError::MissingPoints.into()),
        Some(points) => serde_json::from_value(points.clone())
            .map_err(|e| format!("Invalid points: {}", e))?,
    };

    let key = canonicalizer.revalidate(&stored)?;
    let already_canonical = key.as_bytes() == stored.as_slice();

    if json_output {
        let report = json!({
            "canonical": key,
            "stored_was_canonical": already_canonical,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_key(&key);
        println!(
            "stored:    {}",
            if already_canonical { "canonical" } else { "rewritten" }
        );
    }
    Ok(())
}
