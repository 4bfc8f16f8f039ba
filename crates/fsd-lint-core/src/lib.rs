//! # fsd-lint-core
//!
//! Feature-Sliced Design structure and dependency analysis for JavaScript
//! and TypeScript source trees.
//!
//! The pipeline runs in two phases:
//!
//! - [`StructureBuilder`] walks the source root into layers, slices and
//!   segments.
//! - [`Analyzer`] scans every file of that model with [`ImportExtractor`],
//!   rewrites aliases with [`AliasResolver`], maps each import to a layer
//!   with [`PathLocator`] and records a classified edge in a
//!   [`DependencyStore`].
//!
//! Classification is pluggable through [`DependencyClassifier`];
//! [`LayerOrderClassifier`] is the layer-order rule set.
//!
//! ```no_run
//! use fsd_lint_core::{Analyzer, FsdConfig};
//!
//! let structure = Analyzer::builder()
//!     .root("web/src")
//!     .config(FsdConfig::default())
//!     .build()
//!     .analyze();
//!
//! for dep in structure.dependencies.problematic() {
//!     println!("{dep}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alias;
pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod dependency;
pub mod extractor;
pub mod locator;
pub mod structure;
pub mod vocabulary;

pub use alias::AliasResolver;
pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use classifier::{AllowList, DependencyClassifier, LayerOrderClassifier, SliceRef};
pub use config::{ConfigError, FsdConfig, OutputConfig};
pub use dependency::{Dependency, DependencyKind, DependencyStore};
pub use extractor::ImportExtractor;
pub use locator::{LayerSlice, PathLocator};
pub use structure::{
    ExcludeFilter, Layer, ProjectStructure, Segment, Slice, StructureBuilder, Summary,
};
pub use vocabulary::Vocabulary;
