//! Analysis pipeline: structure, imports, classification.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::alias::AliasResolver;
use crate::classifier::{AllowList, DependencyClassifier, LayerOrderClassifier, SliceRef};
use crate::config::FsdConfig;
use crate::dependency::{Dependency, DependencyStore};
use crate::extractor::ImportExtractor;
use crate::locator::PathLocator;
use crate::structure::{ExcludeFilter, ProjectStructure, StructureBuilder};
use crate::vocabulary::Vocabulary;

/// Boxed classifier strategy.
pub type ClassifierBox = Box<dyn DependencyClassifier>;

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    config: Option<FsdConfig>,
    classifier: Option<ClassifierBox>,
    extra_excludes: Vec<String>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source root holding the layer directories.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: FsdConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the layer-order classifier.
    #[must_use]
    pub fn classifier<C: DependencyClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Adds an excluded directory name on top of the configured ones.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.extra_excludes.push(name.into());
        self
    }

    /// Adds several excluded directory names.
    #[must_use]
    pub fn excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_excludes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Builds the analyzer.
    ///
    /// Without an explicit root, the configured `src_dir` is used as is.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.src_dir.clone());
        let vocabulary = config.vocabulary();

        let filter = ExcludeFilter::new(
            config.exclude_dirs.iter().chain(&self.extra_excludes),
            config.skip_hidden,
        );
        let aliases = AliasResolver::from_map(&config.aliases);
        let classifier = self.classifier.unwrap_or_else(|| {
            Box::new(LayerOrderClassifier::new(
                vocabulary.clone(),
                AllowList::new(config.allowed_cyclical.iter().cloned()),
            ))
        });

        Analyzer {
            root,
            vocabulary,
            filter,
            aliases,
            classifier,
            extractor: ImportExtractor::new(),
        }
    }
}

/// Builds a [`ProjectStructure`] and its dependency edges for one source root.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    vocabulary: Vocabulary,
    filter: ExcludeFilter,
    aliases: AliasResolver,
    classifier: ClassifierBox,
    extractor: ImportExtractor,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the source root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the vocabulary in effect.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Builds only the layer hierarchy, without scanning imports.
    #[must_use]
    pub fn structure(&self) -> ProjectStructure {
        ProjectStructure::new(StructureBuilder::new(&self.vocabulary, &self.filter).build(&self.root))
    }

    /// Runs the full analysis.
    ///
    /// Never fails: a missing or empty root yields an empty structure.
    #[must_use]
    pub fn analyze(&self) -> ProjectStructure {
        info!("Starting analysis at {}", self.root.display());

        let mut structure = self.structure();
        let mut store = DependencyStore::new();
        let mut files_scanned = 0usize;

        for layer in &structure.layers {
            for slice in &layer.slices {
                let slice_name = slice.effective_name(&layer.name);
                for segment in &slice.segments {
                    let dir = self.root.join(slice.segment_dir(&layer.name, segment));
                    for file in &segment.files {
                        self.analyze_file(&dir.join(file), &layer.name, slice_name, &mut store);
                        files_scanned += 1;
                    }
                }
            }
        }

        structure.dependencies = store;

        info!(
            "Analysis complete: {} layer(s), {} file(s), {} dependencies, {} cyclical",
            structure.layers.len(),
            files_scanned,
            structure.dependencies.len(),
            structure.dependencies.problematic().len()
        );

        structure
    }

    /// Scans one file and appends an edge for every import that points into
    /// a known layer.
    pub fn analyze_file(
        &self,
        path: &Path,
        from_layer: &str,
        from_slice: &str,
        store: &mut DependencyStore,
    ) {
        debug!("Scanning: {}", path.display());

        let locator = PathLocator::new(&self.vocabulary);

        for raw in self.extractor.imports(path) {
            let resolved = self.aliases.resolve(&raw);
            let Some(target) = locator.locate(&resolved) else {
                continue;
            };
            let to_slice = target.slice_name();

            let kind = self.classifier.classify(
                SliceRef::new(from_layer, from_slice),
                SliceRef::new(&target.layer, to_slice),
            );
            store.push(Dependency::new(
                from_layer,
                from_slice,
                target.layer.as_str(),
                to_slice,
                kind,
            ));
        }
    }
}
