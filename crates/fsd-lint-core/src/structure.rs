//! Hierarchical project model: layer → slice → segment → files.
//!
//! [`StructureBuilder`] walks the source root once per layer directory and
//! never descends below `layer/slice/segment`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::dependency::{DependencyKind, DependencyStore};
use crate::vocabulary::{is_source_file, Vocabulary, ROOT_SEGMENT};

/// A role-based group of files inside a slice (`ui`, `api`, ... or `root`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment name.
    pub name: String,
    /// File names (not paths), in directory order.
    pub files: Vec<String>,
}

impl Segment {
    /// Is this the implicit segment for files directly under a layer or slice?
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT_SEGMENT
    }
}

/// A named vertical unit within a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Slice name; equal to the layer name for layer-level files.
    pub name: String,
    /// Non-empty segments, `root` first.
    pub segments: Vec<Segment>,
    /// Holds files placed directly in the layer directory. A slice directory
    /// that merely shares the layer's name is not layer-level.
    #[serde(default, skip_serializing_if = "is_false")]
    pub layer_level: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Slice {
    /// Slice name, falling back to the layer name for layer-level or unnamed
    /// slices.
    #[must_use]
    pub fn effective_name<'a>(&'a self, layer: &'a str) -> &'a str {
        if self.layer_level || self.name.is_empty() {
            layer
        } else {
            &self.name
        }
    }

    /// Directory of a segment, relative to the source root.
    #[must_use]
    pub fn segment_dir(&self, layer: &str, segment: &Segment) -> PathBuf {
        let mut dir = PathBuf::from(layer);
        if !self.layer_level {
            dir.push(&self.name);
        }
        if !segment.is_root() {
            dir.push(&segment.name);
        }
        dir
    }
}

/// A top-level architectural tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Position in the vocabulary order.
    pub index: usize,
    /// Layer name.
    pub name: String,
    /// Non-empty slices; the layer-level slice, if any, comes first.
    pub slices: Vec<Slice>,
}

impl Layer {
    /// Looks up a slice by name.
    #[must_use]
    pub fn slice(&self, name: &str) -> Option<&Slice> {
        self.slices.iter().find(|s| s.name == name)
    }
}

/// Result of one analysis run: the hierarchy plus every dependency edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStructure {
    /// Layers present on disk, in vocabulary order.
    pub layers: Vec<Layer>,
    /// One edge per located import statement.
    #[serde(default)]
    pub dependencies: DependencyStore,
}

impl ProjectStructure {
    /// Creates a structure with no dependency edges.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            dependencies: DependencyStore::new(),
        }
    }

    /// Looks up a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// `true` when no layer directory was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Relative paths (`layer/[slice/]segment/file`) of every file in the model.
    #[must_use]
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for layer in &self.layers {
            for slice in &layer.slices {
                for segment in &slice.segments {
                    let dir = slice.segment_dir(&layer.name, segment);
                    paths.extend(segment.files.iter().map(|f| dir.join(f)));
                }
            }
        }
        paths
    }

    /// Aggregate counts for reporting.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let slices = self.layers.iter().flat_map(|l| &l.slices);
        let segments = slices.clone().flat_map(|s| &s.segments);

        Summary {
            layers: self.layers.len(),
            slices: slices.count(),
            segments: segments.clone().count(),
            files: segments.map(|s| s.files.len()).sum(),
            dependencies: self.dependencies.len(),
            normal: self.dependencies.count(DependencyKind::Normal),
            same_layer: self.dependencies.count(DependencyKind::SameLayer),
            cyclical: self.dependencies.count(DependencyKind::Cyclical),
            test: self.dependencies.count(DependencyKind::Test),
        }
    }
}

/// Counts over a [`ProjectStructure`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Layers found.
    pub layers: usize,
    /// Slices across all layers.
    pub slices: usize,
    /// Segments across all slices.
    pub segments: usize,
    /// Source files across all segments.
    pub files: usize,
    /// Total dependency edges.
    pub dependencies: usize,
    /// Edges in the allowed direction.
    pub normal: usize,
    /// Edges within one layer.
    pub same_layer: usize,
    /// Architecture violations.
    pub cyclical: usize,
    /// Edges touching the `test` layer.
    pub test: usize,
}

/// Decides which directories the walk may enter.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    names: HashSet<String>,
    patterns: Vec<glob::Pattern>,
    skip_hidden: bool,
}

impl ExcludeFilter {
    /// Builds a filter from directory names or glob patterns over names.
    ///
    /// Entries with invalid glob syntax are matched literally.
    #[must_use]
    pub fn new<I, S>(entries: I, skip_hidden: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = HashSet::new();
        let mut patterns = Vec::new();

        for entry in entries {
            let entry = entry.as_ref();
            if entry.contains(['*', '?', '[']) {
                match glob::Pattern::new(entry) {
                    Ok(p) => patterns.push(p),
                    Err(e) => {
                        debug!("Treating exclude entry {entry:?} literally: {e}");
                        names.insert(entry.to_string());
                    }
                }
            } else {
                names.insert(entry.to_string());
            }
        }

        Self {
            names,
            patterns,
            skip_hidden,
        }
    }

    /// Should a directory with this name be skipped?
    #[must_use]
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        if self.skip_hidden && dir_name.starts_with('.') {
            return true;
        }
        self.names.contains(dir_name) || self.patterns.iter().any(|p| p.matches(dir_name))
    }
}

/// Builds the layer hierarchy from a source root.
pub struct StructureBuilder<'a> {
    vocabulary: &'a Vocabulary,
    filter: &'a ExcludeFilter,
}

/// Slice under construction while its directory is being walked.
struct SliceDraft {
    name: String,
    root_files: Vec<String>,
    segments: Vec<Segment>,
}

impl SliceDraft {
    fn new(name: String) -> Self {
        Self {
            name,
            root_files: Vec::new(),
            segments: Vec::new(),
        }
    }

    fn finish(self) -> Option<Slice> {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        if !self.root_files.is_empty() {
            segments.push(Segment {
                name: ROOT_SEGMENT.to_string(),
                files: self.root_files,
            });
        }
        segments.extend(self.segments.into_iter().filter(|s| !s.files.is_empty()));

        if segments.is_empty() {
            None
        } else {
            Some(Slice {
                name: self.name,
                segments,
                layer_level: false,
            })
        }
    }
}

impl<'a> StructureBuilder<'a> {
    /// Creates a builder over the given vocabulary and exclusion filter.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, filter: &'a ExcludeFilter) -> Self {
        Self { vocabulary, filter }
    }

    /// Builds every layer found directly under `root`, in vocabulary order.
    ///
    /// Missing layers and unreadable directories are skipped.
    #[must_use]
    pub fn build(&self, root: &Path) -> Vec<Layer> {
        let mut layers = Vec::new();

        for (index, name) in self.vocabulary.layers().iter().enumerate() {
            if self.filter.is_excluded(name) {
                debug!("Excluding layer directory: {name}");
                continue;
            }
            let path = root.join(name);
            if !path.is_dir() {
                continue;
            }
            layers.push(self.build_layer(index, name, &path));
        }

        layers
    }

    fn build_layer(&self, index: usize, name: &str, path: &Path) -> Layer {
        let mut layer_files = Vec::new();
        let mut drafts: Vec<SliceDraft> = Vec::new();

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(3)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.admits(e));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {e}", path.display());
                    continue;
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().is_dir();

            match (entry.depth(), is_dir) {
                (1, true) => drafts.push(SliceDraft::new(file_name)),
                (1, false) if is_source_file(&file_name) => layer_files.push(file_name),
                (2, true) => {
                    if let Some(draft) = drafts.last_mut() {
                        draft.segments.push(Segment {
                            name: file_name,
                            files: Vec::new(),
                        });
                    }
                }
                (2, false) if is_source_file(&file_name) => {
                    if let Some(draft) = drafts.last_mut() {
                        draft.root_files.push(file_name);
                    }
                }
                (3, false) if is_source_file(&file_name) => {
                    if let Some(segment) = drafts.last_mut().and_then(|d| d.segments.last_mut()) {
                        segment.files.push(file_name);
                    }
                }
                _ => {}
            }
        }

        let mut slices = Vec::with_capacity(drafts.len() + 1);
        if !layer_files.is_empty() {
            slices.push(Slice {
                name: name.to_string(),
                segments: vec![Segment {
                    name: ROOT_SEGMENT.to_string(),
                    files: layer_files,
                }],
                layer_level: true,
            });
        }
        slices.extend(drafts.into_iter().filter_map(SliceDraft::finish));

        debug!("Layer {name}: {} slice(s)", slices.len());

        Layer {
            index,
            name: name.to_string(),
            slices,
        }
    }

    /// Directory admission: not excluded, and at slice depth only recognized
    /// segment names may be entered.
    fn admits(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        if self.filter.is_excluded(&name) {
            debug!("Excluding: {}", entry.path().display());
            return false;
        }
        match entry.depth() {
            0 | 1 => true,
            2 => self.vocabulary.is_segment(&name),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    fn build(root: &Path, filter: &ExcludeFilter) -> Vec<Layer> {
        let vocabulary = Vocabulary::default();
        StructureBuilder::new(&vocabulary, filter).build(root)
    }

    #[test]
    fn layers_follow_vocabulary_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "shared/ui/Button.tsx");
        touch(tmp.path(), "app/index.ts");
        touch(tmp.path(), "features/auth/model/store.ts");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["app", "features", "shared"]);
        assert_eq!(layers[0].index, 0);
        assert_eq!(layers[1].index, 4);
        assert_eq!(layers[2].index, 6);
    }

    #[test]
    fn layer_level_files_form_root_slice() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app/index.ts");
        touch(tmp.path(), "app/App.vue");
        touch(tmp.path(), "app/README.md");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let slice = &layers[0].slices[0];
        assert_eq!(slice.name, "app");
        assert_eq!(slice.segments.len(), 1);
        assert_eq!(slice.segments[0].name, "root");
        assert_eq!(slice.segments[0].files, ["App.vue", "index.ts"]);
    }

    #[test]
    fn slice_root_files_come_before_named_segments() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "entities/user/index.ts");
        touch(tmp.path(), "entities/user/api/getUser.ts");
        touch(tmp.path(), "entities/user/ui/UserCard.tsx");
        touch(tmp.path(), "entities/user/ui/UserCard.css");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let user = layers[0].slice("user").unwrap();
        let names: Vec<&str> = user.segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["root", "api", "ui"]);
        assert_eq!(user.segments[2].files, ["UserCard.tsx"]);
    }

    #[test]
    fn unknown_segments_are_not_descended() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "features/auth/components/Form.tsx");
        touch(tmp.path(), "features/auth/ui/nested/Deep.tsx");
        touch(tmp.path(), "features/auth/ui/Login.tsx");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let auth = layers[0].slice("auth").unwrap();
        assert_eq!(auth.segments.len(), 1);
        assert_eq!(auth.segments[0].name, "ui");
        assert_eq!(auth.segments[0].files, ["Login.tsx"]);
    }

    #[test]
    fn empty_slices_and_segments_are_dropped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "widgets/header/ui/styles.css");
        fs::create_dir_all(tmp.path().join("widgets/footer/model")).unwrap();
        touch(tmp.path(), "widgets/sidebar/ui/Sidebar.tsx");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let names: Vec<&str> = layers[0].slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["sidebar"]);
    }

    #[test]
    fn layer_without_sources_is_kept_empty() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages")).unwrap();

        let layers = build(tmp.path(), &ExcludeFilter::default());
        assert_eq!(layers.len(), 1);
        assert!(layers[0].slices.is_empty());
    }

    #[test]
    fn excluded_directories_are_never_entered() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "shared/node_modules/ui/x.ts");
        touch(tmp.path(), "shared/lib/node_modules/y.ts");
        touch(tmp.path(), "shared/api.generated/client.ts");
        touch(tmp.path(), "shared/.cache/z.ts");
        touch(tmp.path(), "shared/config/env.ts");

        let filter = ExcludeFilter::new(["node_modules", "*.generated"], true);
        let layers = build(tmp.path(), &filter);
        let names: Vec<&str> = layers[0].slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["config"]);
    }

    #[test]
    fn exclude_filter_matching() {
        let filter = ExcludeFilter::new(["dist", "*.bak", "[invalid"], true);
        assert!(filter.is_excluded("dist"));
        assert!(filter.is_excluded("old.bak"));
        assert!(filter.is_excluded("[invalid"));
        assert!(filter.is_excluded(".git"));
        assert!(!filter.is_excluded("src"));

        let keep_hidden = ExcludeFilter::new(Vec::<String>::new(), false);
        assert!(!keep_hidden.is_excluded(".storybook"));
    }

    #[test]
    fn missing_root_yields_no_layers() {
        let tmp = TempDir::new().unwrap();
        let layers = build(&tmp.path().join("nope"), &ExcludeFilter::default());
        assert!(layers.is_empty());
    }

    #[test]
    fn file_paths_reconstruct_layout() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app/index.ts");
        touch(tmp.path(), "entities/user/index.ts");
        touch(tmp.path(), "entities/user/model/user.ts");

        let structure = ProjectStructure::new(build(tmp.path(), &ExcludeFilter::default()));
        let paths = structure.file_paths();
        assert_eq!(
            paths,
            [
                PathBuf::from("app/index.ts"),
                PathBuf::from("entities/user/index.ts"),
                PathBuf::from("entities/user/model/user.ts"),
            ]
        );
        for p in &paths {
            assert!(tmp.path().join(p).is_file());
        }
    }

    #[test]
    fn slice_named_after_its_layer_keeps_its_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "entities/index.ts");
        touch(tmp.path(), "entities/entities/index.ts");
        touch(tmp.path(), "entities/entities/model/list.ts");

        let layers = build(tmp.path(), &ExcludeFilter::default());
        let slices = &layers[0].slices;
        assert_eq!(slices.len(), 2);
        assert!(slices[0].layer_level);
        assert!(!slices[1].layer_level);
        assert_eq!(slices[1].name, "entities");

        let structure = ProjectStructure::new(layers);
        let paths = structure.file_paths();
        assert_eq!(
            paths,
            [
                PathBuf::from("entities/index.ts"),
                PathBuf::from("entities/entities/index.ts"),
                PathBuf::from("entities/entities/model/list.ts"),
            ]
        );
        for p in &paths {
            assert!(tmp.path().join(p).is_file(), "{} missing", p.display());
        }
    }

    #[test]
    fn layer_level_flag_survives_json_round_trip() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app/index.ts");
        touch(tmp.path(), "app/app/index.ts");

        let structure = ProjectStructure::new(build(tmp.path(), &ExcludeFilter::default()));
        let json = serde_json::to_value(&structure).unwrap();
        assert_eq!(json["layers"][0]["slices"][0]["layer_level"], true);
        assert!(json["layers"][0]["slices"][1].get("layer_level").is_none());

        let back: ProjectStructure = serde_json::from_value(json).unwrap();
        assert_eq!(back, structure);
    }

    #[test]
    fn summary_counts_tree() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app/index.ts");
        touch(tmp.path(), "entities/user/index.ts");
        touch(tmp.path(), "entities/user/model/user.ts");
        touch(tmp.path(), "entities/post/ui/Post.tsx");

        let structure = ProjectStructure::new(build(tmp.path(), &ExcludeFilter::default()));
        let summary = structure.summary();
        assert_eq!(summary.layers, 2);
        assert_eq!(summary.slices, 3);
        assert_eq!(summary.segments, 4);
        assert_eq!(summary.files, 4);
        assert_eq!(summary.dependencies, 0);
    }
}
