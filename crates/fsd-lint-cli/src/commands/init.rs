//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE_NAME: &str = "fsd-lint.toml";

/// Commented starter configuration; every value shown is the default.
pub const DEFAULT_CONFIG: &str = r#"# fsd-lint configuration

[analyzer]
# Directory holding the layer directories. "." also picks up ./src when present.
src_dir = "."

# Directory names (or glob patterns over names) that are never entered
exclude_dirs = ["node_modules", ".git", "dist", "build"]

# Skip dot-prefixed directories
skip_hidden = true

[architecture]
# Layers from most composed to most fundamental.
# Imports may only point toward later layers.
layers = ["app", "processes", "pages", "widgets", "features", "entities", "shared"]

# Recognized segment directories inside a slice
segments = ["ui", "api", "model", "lib", "config"]

# Layers or "layer/slice" pairs whose upward imports are tolerated
# allowed_cyclical = ["shared/config"]

[aliases]
# Import prefix = replacement path
"@" = "src"

[output]
# Write fsd_structure.json into `dir` after every check
json = false
dir = "./dist"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Adjust [architecture] and [aliases] for your project");
    println!("  2. Run: fsd-lint check");

    Ok(())
}
