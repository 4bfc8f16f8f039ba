//! Dependency edges and the store that accumulates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Allowed direction, or not policed.
    Normal,
    /// Both ends in the same layer.
    SameLayer,
    /// Against the layer order and not allow-listed.
    Cyclical,
    /// Either end is the `test` layer.
    Test,
}

impl DependencyKind {
    /// Stable lowercase name, as serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::SameLayer => "same-layer",
            Self::Cyclical => "cyclical",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directed edge, inferred from one import statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Layer of the importing file.
    pub from_layer: String,
    /// Slice of the importing file.
    pub from_slice: String,
    /// Layer of the import target.
    pub to_layer: String,
    /// Slice of the import target.
    pub to_slice: String,
    /// Classification.
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates an edge.
    #[must_use]
    pub fn new(
        from_layer: impl Into<String>,
        from_slice: impl Into<String>,
        to_layer: impl Into<String>,
        to_slice: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            from_layer: from_layer.into(),
            from_slice: from_slice.into(),
            to_layer: to_layer.into(),
            to_slice: to_slice.into(),
            kind,
        }
    }

    /// Does either end sit in `layer`?
    #[must_use]
    pub fn touches_layer(&self, layer: &str) -> bool {
        self.from_layer == layer || self.to_layer == layer
    }

    /// Does either end sit in `layer/slice`?
    #[must_use]
    pub fn touches_slice(&self, layer: &str, slice: &str) -> bool {
        (self.from_layer == layer && self.from_slice == slice)
            || (self.to_layer == layer && self.to_slice == slice)
    }

    /// Is this an architecture violation?
    #[must_use]
    pub fn is_violation(&self) -> bool {
        self.kind == DependencyKind::Cyclical
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} -> {}/{} [{}]",
            self.from_layer, self.from_slice, self.to_layer, self.to_slice, self.kind
        )
    }
}

/// Multiset of dependency edges.
///
/// Edges are kept one per matched import; duplicates are not merged and
/// order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyStore {
    edges: Vec<Dependency>,
}

impl DependencyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one edge.
    pub fn push(&mut self, dependency: Dependency) {
        self.edges.push(dependency);
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// `true` when no edges were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over all edges.
    pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
        self.edges.iter()
    }

    /// All edges as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Dependency] {
        &self.edges
    }

    /// Edges with either end in `layer`.
    #[must_use]
    pub fn for_layer(&self, layer: &str) -> Vec<&Dependency> {
        self.edges.iter().filter(|d| d.touches_layer(layer)).collect()
    }

    /// Edges with either end in `layer/slice`.
    #[must_use]
    pub fn for_slice(&self, layer: &str, slice: &str) -> Vec<&Dependency> {
        self.edges
            .iter()
            .filter(|d| d.touches_slice(layer, slice))
            .collect()
    }

    /// Cyclical edges only.
    #[must_use]
    pub fn problematic(&self) -> Vec<&Dependency> {
        self.edges.iter().filter(|d| d.is_violation()).collect()
    }

    /// Number of edges of one kind.
    #[must_use]
    pub fn count(&self, kind: DependencyKind) -> usize {
        self.edges.iter().filter(|d| d.kind == kind).count()
    }

    /// `true` if any edge is cyclical.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.edges.iter().any(Dependency::is_violation)
    }
}

impl Extend<Dependency> for DependencyStore {
    fn extend<T: IntoIterator<Item = Dependency>>(&mut self, iter: T) {
        self.edges.extend(iter);
    }
}

impl FromIterator<Dependency> for DependencyStore {
    fn from_iter<T: IntoIterator<Item = Dependency>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DependencyStore {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl IntoIterator for DependencyStore {
    type Item = Dependency;
    type IntoIter = std::vec::IntoIter<Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}
