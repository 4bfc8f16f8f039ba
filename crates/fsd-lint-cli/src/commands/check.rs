//! Check command implementation.

use anyhow::{Context, Result};
use fsd_lint_core::{Analyzer, OutputConfig, ProjectStructure};
use std::fs;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// File written by `--export`.
pub const EXPORT_FILE_NAME: &str = "fsd_structure.json";

/// Arguments of the check command.
pub struct CheckOptions {
    /// Project directory.
    pub path: PathBuf,
    /// Report format.
    pub format: OutputFormat,
    /// Export directory overriding `[output] dir`, relative to `path`.
    pub export: Option<PathBuf>,
    /// Do not exit non-zero on cyclical dependencies.
    pub no_fail: bool,
    /// Extra excluded directory names.
    pub exclude: Vec<String>,
    /// Explicit config path.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
pub fn run(opts: &CheckOptions) -> Result<()> {
    let config = super::load_config(&opts.path, opts.config.as_deref())?;

    let root = source_root(&opts.path, &config.src_dir);
    let export_to = export_dir(&opts.path, opts.export.as_deref(), &config.output);

    tracing::info!("Analyzing {}", root.display());

    let analyzer = Analyzer::builder()
        .root(&root)
        .config(config)
        .excludes(opts.exclude.iter().cloned())
        .build();
    let structure = analyzer.analyze();

    super::output::print(&root, &structure, opts.format)?;

    if let Some(dir) = export_to {
        let written = export(&structure, &dir)?;
        tracing::info!("Exported structure to {}", written.display());
    }

    if structure.dependencies.has_violations() && !opts.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

/// Directory holding the layer directories.
///
/// A `src_dir` of `.` falls back to `<project>/src` when that directory
/// exists. Absolute `src_dir` values are used as is.
#[must_use]
pub fn source_root(project: &Path, src_dir: &Path) -> PathBuf {
    if src_dir.is_absolute() {
        return src_dir.to_path_buf();
    }
    if src_dir == Path::new(".") {
        let src = project.join("src");
        if src.is_dir() {
            return src;
        }
        return project.to_path_buf();
    }
    project.join(src_dir)
}

/// Directory that receives `fsd_structure.json`, if any.
///
/// `--export` wins over `[output]`. Relative directories from either source
/// are resolved against the project directory.
#[must_use]
pub fn export_dir(
    project: &Path,
    export: Option<&Path>,
    output: &OutputConfig,
) -> Option<PathBuf> {
    match export {
        Some(dir) => Some(project.join(dir)),
        None if output.json => Some(project.join(&output.dir)),
        None => None,
    }
}

/// Writes `fsd_structure.json` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns error if the directory or file cannot be written.
pub fn export(structure: &ProjectStructure, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(EXPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(structure)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
