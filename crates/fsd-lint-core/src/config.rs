//! TOML configuration for fsd-lint.
//!
//! Sections: `[analyzer]`, `[architecture]`, `[aliases]` and `[output]`.
//! Every field has a default, so an empty file is a valid configuration.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::vocabulary::{Vocabulary, DEFAULT_LAYERS, DEFAULT_SEGMENTS};

/// Top-level fsd-lint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsdConfig {
    /// Directory (relative to the project) that holds the layer directories.
    pub src_dir: PathBuf,

    /// Directory names (or glob patterns over names) never traversed.
    pub exclude_dirs: Vec<String>,

    /// Skip dot-prefixed directories.
    pub skip_hidden: bool,

    /// Layer names in dependency order.
    pub layers: Vec<String>,

    /// Recognized segment names.
    pub segments: Vec<String>,

    /// Layer or `layer/slice` identifiers exempt from cyclical classification.
    pub allowed_cyclical: Vec<String>,

    /// Import prefix → replacement path.
    pub aliases: BTreeMap<String, String>,

    /// Export settings.
    pub output: OutputConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives exported files.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Write `fsd_structure.json` after every check.
    #[serde(default)]
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            json: false,
        }
    }
}

impl Default for FsdConfig {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            exclude_dirs: default_exclude_dirs(),
            skip_hidden: true,
            layers: default_layers(),
            segments: default_segments(),
            allowed_cyclical: Vec::new(),
            aliases: default_aliases(),
            output: OutputConfig::default(),
        }
    }
}

fn default_src_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./dist")
}

fn default_exclude_dirs() -> Vec<String> {
    ["node_modules", ".git", "dist", "build"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_layers() -> Vec<String> {
    DEFAULT_LAYERS.iter().map(|s| (*s).to_string()).collect()
}

fn default_segments() -> Vec<String> {
    DEFAULT_SEGMENTS.iter().map(|s| (*s).to_string()).collect()
}

fn default_aliases() -> BTreeMap<String, String> {
    [("@".to_string(), "src".to_string())].into_iter().collect()
}

fn default_true() -> bool {
    true
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl FsdConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct RawConfig {
            #[serde(default)]
            analyzer: AnalyzerSection,
            #[serde(default)]
            architecture: ArchitectureSection,
            #[serde(default = "default_aliases")]
            aliases: BTreeMap<String, String>,
            #[serde(default)]
            output: OutputConfig,
        }

        #[derive(Deserialize)]
        struct AnalyzerSection {
            #[serde(default = "default_src_dir")]
            src_dir: PathBuf,
            #[serde(default = "default_exclude_dirs")]
            exclude_dirs: Vec<String>,
            #[serde(default = "default_true")]
            skip_hidden: bool,
        }

        impl Default for AnalyzerSection {
            fn default() -> Self {
                Self {
                    src_dir: default_src_dir(),
                    exclude_dirs: default_exclude_dirs(),
                    skip_hidden: true,
                }
            }
        }

        #[derive(Deserialize)]
        struct ArchitectureSection {
            #[serde(default = "default_layers")]
            layers: Vec<String>,
            #[serde(default = "default_segments")]
            segments: Vec<String>,
            #[serde(default)]
            allowed_cyclical: Vec<String>,
        }

        impl Default for ArchitectureSection {
            fn default() -> Self {
                Self {
                    layers: default_layers(),
                    segments: default_segments(),
                    allowed_cyclical: Vec::new(),
                }
            }
        }

        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        Ok(Self {
            src_dir: raw.analyzer.src_dir,
            exclude_dirs: raw.analyzer.exclude_dirs,
            skip_hidden: raw.analyzer.skip_hidden,
            layers: raw.architecture.layers,
            segments: raw.architecture.segments,
            allowed_cyclical: raw.architecture.allowed_cyclical,
            aliases: raw.aliases,
            output: raw.output,
        })
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::Validation(
                "architecture.layers: at least one layer is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if layer.is_empty() || layer.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "architecture.layers: invalid layer name '{layer}'"
                )));
            }
            if !seen.insert(layer.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "architecture.layers: duplicate layer '{layer}'"
                )));
            }
        }

        if let Some(seg) = self.segments.iter().find(|s| s.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "architecture.segments: invalid segment name '{seg}'"
            )));
        }

        for (i, entry) in self.allowed_cyclical.iter().enumerate() {
            let layer = entry.split('/').next().unwrap_or_default();
            if !seen.contains(layer) {
                return Err(ConfigError::Validation(format!(
                    "architecture.allowed_cyclical[{i}]: unknown layer in '{entry}'"
                )));
            }
        }

        Ok(())
    }

    /// The layer/segment vocabulary described by this config.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.layers.iter().cloned(), self.segments.iter().cloned())
    }
}
