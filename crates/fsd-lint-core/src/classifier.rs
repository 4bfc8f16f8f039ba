//! Dependency classification against the layer order.

use std::collections::HashSet;

use crate::dependency::DependencyKind;
use crate::vocabulary::{Vocabulary, TEST_LAYER};

/// One end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRef<'a> {
    /// Layer name.
    pub layer: &'a str,
    /// Slice name.
    pub slice: &'a str,
}

impl<'a> SliceRef<'a> {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(layer: &'a str, slice: &'a str) -> Self {
        Self { layer, slice }
    }

    /// `layer/slice`, or just `layer` for a layer-level slice.
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.slice.is_empty() || self.slice == self.layer {
            self.layer.to_string()
        } else {
            format!("{}/{}", self.layer, self.slice)
        }
    }
}

/// Strategy that assigns a [`DependencyKind`] to an edge.
pub trait DependencyClassifier: Send + Sync {
    /// Classifies the edge `from → to`.
    fn classify(&self, from: SliceRef<'_>, to: SliceRef<'_>) -> DependencyKind;
}

/// Layers and `layer/slice` pairs exempt from cyclical classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    entries: HashSet<String>,
}

impl AllowList {
    /// Builds an allow-list from configured entries.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Is the whole layer allow-listed?
    #[must_use]
    pub fn allows_layer(&self, layer: &str) -> bool {
        self.entries.contains(layer)
    }

    /// Is this exact slice allow-listed?
    #[must_use]
    pub fn allows_slice(&self, end: SliceRef<'_>) -> bool {
        self.entries.contains(&end.qualified())
    }
}

/// Canonical classifier: dependencies must point from composed layers
/// (low index) toward fundamental ones (high index).
#[derive(Debug, Clone)]
pub struct LayerOrderClassifier {
    vocabulary: Vocabulary,
    allow: AllowList,
}

impl LayerOrderClassifier {
    /// Creates a classifier over a vocabulary and allow-list.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, allow: AllowList) -> Self {
        Self { vocabulary, allow }
    }
}

impl DependencyClassifier for LayerOrderClassifier {
    fn classify(&self, from: SliceRef<'_>, to: SliceRef<'_>) -> DependencyKind {
        if from.layer == TEST_LAYER || to.layer == TEST_LAYER {
            return DependencyKind::Test;
        }

        let (Some(from_idx), Some(to_idx)) = (
            self.vocabulary.index_of(from.layer),
            self.vocabulary.index_of(to.layer),
        ) else {
            return DependencyKind::Normal;
        };

        if from.layer == to.layer {
            return DependencyKind::SameLayer;
        }

        if from_idx < to_idx {
            return DependencyKind::Normal;
        }

        if self.allow.allows_slice(from)
            || self.allow.allows_slice(to)
            || self.allow.allows_layer(from.layer)
            || self.allow.allows_layer(to.layer)
        {
            DependencyKind::Normal
        } else {
            DependencyKind::Cyclical
        }
    }
}
