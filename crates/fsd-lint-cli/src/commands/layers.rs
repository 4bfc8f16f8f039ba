//! Layers command implementation.

use anyhow::Result;
use std::path::Path;

/// Runs the layers command.
pub fn run(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(path, config_path)?;
    let vocabulary = config.vocabulary();

    println!("Layers (imports may point downward only):\n");
    println!("{:<6} {:<15} Note", "Order", "Layer");
    println!("{}", "-".repeat(40));

    for (index, layer) in vocabulary.layers().iter().enumerate() {
        let note = if config.allowed_cyclical.iter().any(|a| a == layer) {
            "upward imports allowed"
        } else {
            ""
        };
        println!("{index:<6} {layer:<15} {note}");
    }

    println!("\nSegments: {}", vocabulary.segments().join(", "));

    let slices: Vec<&str> = config
        .allowed_cyclical
        .iter()
        .filter(|a| a.contains('/'))
        .map(String::as_str)
        .collect();
    if !slices.is_empty() {
        println!("Allowed slices: {}", slices.join(", "));
    }

    Ok(())
}
