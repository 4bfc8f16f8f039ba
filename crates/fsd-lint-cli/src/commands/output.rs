//! Output formatting for check results.

use anyhow::Result;
use fsd_lint_core::{DependencyKind, ProjectStructure, Slice, Summary};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// JSON report: the exported structure plus its summary.
#[derive(Serialize)]
struct Report<'a> {
    root: &'a Path,
    summary: Summary,
    #[serde(flatten)]
    structure: &'a ProjectStructure,
}

/// Print check results in the specified format.
pub fn print(root: &Path, structure: &ProjectStructure, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(root, structure)),
        OutputFormat::Json => return print_json(root, structure),
        OutputFormat::Compact => print!("{}", render_compact(structure)),
    }
    Ok(())
}

fn print_json(root: &Path, structure: &ProjectStructure) -> Result<()> {
    let report = Report {
        root,
        summary: structure.summary(),
        structure,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

fn describe_slice(slice: &Slice, layer: &str) -> String {
    let segments: Vec<String> = slice
        .segments
        .iter()
        .map(|s| format!("{}({})", s.name, s.files.len()))
        .collect();
    format!("{}: {}", slice.effective_name(layer), segments.join(", "))
}

fn render_text(root: &Path, structure: &ProjectStructure) -> String {
    let mut out = String::new();
    let summary = structure.summary();

    if structure.is_empty() {
        let _ = writeln!(out, "No layers found under {}", root.display());
        return out;
    }

    let _ = writeln!(out, "Structure of {}", root.display());
    for layer in &structure.layers {
        let _ = writeln!(out, "  {} ({} slice(s))", layer.name, layer.slices.len());
        for slice in &layer.slices {
            let _ = writeln!(out, "    {}", describe_slice(slice, &layer.name));
        }
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Dependencies: {} ({} normal, {} same-layer, {} cyclical, {} test)",
        summary.dependencies, summary.normal, summary.same_layer, summary.cyclical, summary.test
    );

    let problems = structure.dependencies.problematic();
    if !problems.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Cyclical dependencies:");
        for dep in &problems {
            let _ = writeln!(
                out,
                "  \x1b[31m{}/{} -> {}/{}\x1b[0m",
                dep.from_layer, dep.from_slice, dep.to_layer, dep.to_slice
            );
        }
    }
    out.push('\n');

    let color = if summary.cyclical > 0 {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(
        out,
        "{color}Found {} cyclical dependenc{} in {} file(s)\x1b[0m",
        summary.cyclical,
        if summary.cyclical == 1 { "y" } else { "ies" },
        summary.files
    );
    out
}

fn render_compact(structure: &ProjectStructure) -> String {
    let mut out = String::new();
    for dep in structure
        .dependencies
        .iter()
        .filter(|d| d.kind == DependencyKind::Cyclical)
    {
        let _ = writeln!(out, "{dep}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsd_lint_core::{Dependency, Layer, Segment};

    fn sample() -> ProjectStructure {
        let mut structure = ProjectStructure::new(vec![Layer {
            index: 4,
            name: "features".into(),
            slices: vec![Slice {
                name: "auth".into(),
                segments: vec![
                    Segment {
                        name: "model".into(),
                        files: vec!["session.ts".into()],
                    },
                    Segment {
                        name: "ui".into(),
                        files: vec!["LoginForm.tsx".into(), "Field.tsx".into()],
                    },
                ],
                layer_level: false,
            }],
        }]);
        structure.dependencies.extend([
            Dependency::new("features", "auth", "entities", "user", DependencyKind::Normal),
            Dependency::new("features", "auth", "pages", "home", DependencyKind::Cyclical),
        ]);
        structure
    }

    #[test]
    fn text_lists_hierarchy_and_violations() {
        let text = render_text(Path::new("src"), &sample());
        assert!(text.contains("Structure of src"));
        assert!(text.contains("features (1 slice(s))"));
        assert!(text.contains("auth: model(1), ui(2)"));
        assert!(text.contains("Dependencies: 2 (1 normal, 0 same-layer, 1 cyclical, 0 test)"));
        assert!(text.contains("features/auth -> pages/home"));
        assert!(text.contains("Found 1 cyclical dependency in 3 file(s)"));
    }

    #[test]
    fn text_reports_empty_root() {
        let text = render_text(Path::new("web"), &ProjectStructure::default());
        assert_eq!(text, "No layers found under web\n");
    }

    #[test]
    fn compact_prints_only_cyclical_edges() {
        let compact = render_compact(&sample());
        assert_eq!(compact, "features/auth -> pages/home [cyclical]\n");
    }

    #[test]
    fn json_report_flattens_structure() {
        let structure = sample();
        let report = Report {
            root: Path::new("src"),
            summary: structure.summary(),
            structure: &structure,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["root"], "src");
        assert_eq!(json["summary"]["cyclical"], 1);
        assert_eq!(json["layers"][0]["slices"][0]["name"], "auth");
        assert_eq!(json["dependencies"][1]["type"], "cyclical");
    }
}
