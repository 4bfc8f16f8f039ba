//! Layer and segment vocabulary.
//!
//! The order of the layer list defines the allowed dependency direction:
//! index 0 is the most composed layer, the last index the most fundamental.

use std::collections::HashMap;

/// Default Feature-Sliced Design layer order.
pub const DEFAULT_LAYERS: &[&str] = &[
    "app",
    "processes",
    "pages",
    "widgets",
    "features",
    "entities",
    "shared",
];

/// Default recognized segment names.
pub const DEFAULT_SEGMENTS: &[&str] = &["ui", "api", "model", "lib", "config"];

/// Segment name used for files that sit directly under a layer or slice.
pub const ROOT_SEGMENT: &str = "root";

/// Layer name that is exempt from ordering checks.
pub const TEST_LAYER: &str = "test";

/// Extensions of files that belong to the structure model.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "vue"];

/// Extensions of files whose imports are scanned.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Ordered layer names plus recognized segment names.
///
/// Built once from configuration and shared by reference with every
/// component of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    layers: Vec<String>,
    segments: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from explicit layer and segment lists.
    ///
    /// Duplicate layer names keep their first position.
    #[must_use]
    pub fn new<L, S>(layers: L, segments: S) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let layers: Vec<String> = layers.into_iter().map(Into::into).collect();
        let segments = segments.into_iter().map(Into::into).collect();

        let mut index = HashMap::with_capacity(layers.len());
        for (i, name) in layers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        Self {
            layers,
            segments,
            index,
        }
    }

    /// Layer names in dependency order.
    #[must_use]
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Recognized segment names.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Position of a layer in the order, if it is known.
    #[must_use]
    pub fn index_of(&self, layer: &str) -> Option<usize> {
        self.index.get(layer).copied()
    }

    /// Is this a configured layer name?
    #[must_use]
    pub fn is_layer(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Is this a recognized segment name?
    #[must_use]
    pub fn is_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s == name)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_LAYERS.iter().copied(),
            DEFAULT_SEGMENTS.iter().copied(),
        )
    }
}

/// Returns the lowercase extension of a file name, without the dot.
pub(crate) fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Does the file name denote a source module that belongs in the structure?
#[must_use]
pub fn is_source_file(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

/// Does the file name denote a script whose imports are scanned?
#[must_use]
pub fn is_script_file(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext.as_str()))
}
