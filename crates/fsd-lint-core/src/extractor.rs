//! Line-based import extraction.
//!
//! This is lexical matching, not parsing. Recognized per line:
//!
//! - `import ... from "<path>"`
//! - `import "<path>"`
//! - `require("<path>")`
//!
//! Statements spanning several lines, dynamic `import()` expressions and
//! `export ... from` re-exports are not recognized.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::Path;
use tracing::debug;

use crate::vocabulary::is_script_file;

#[allow(clippy::expect_used)]
static IMPORT_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r#"import\s+.*\s+from\s+['"]([^'"]+)['"]\s*;?"#).expect("import-from pattern"),
        Regex::new(r#"import\s+['"]([^'"]+)['"]\s*;?"#).expect("side-effect import pattern"),
        Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("require pattern"),
    ]
});

/// Import targets found on one line, in pattern order.
///
/// Each pattern contributes at most its first match.
#[must_use]
pub fn scan_line(line: &str) -> Vec<String> {
    IMPORT_PATTERNS
        .iter()
        .filter_map(|re| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts raw import paths from script files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportExtractor;

impl ImportExtractor {
    /// Creates an extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Is this file scanned for imports?
    #[must_use]
    pub fn handles(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_script_file)
    }

    /// Lazily yields the import paths of one file.
    ///
    /// Non-script and unreadable files yield nothing.
    #[must_use]
    pub fn imports(&self, path: &Path) -> Imports {
        if !self.handles(path) {
            return Imports::empty();
        }
        match File::open(path) {
            Ok(file) => Imports {
                lines: Some(BufReader::new(file).split(b'\n')),
                pending: VecDeque::new(),
            },
            Err(e) => {
                debug!("Cannot read {}: {e}", path.display());
                Imports::empty()
            }
        }
    }
}

/// Single-pass iterator over the import paths of one file.
pub struct Imports {
    lines: Option<Split<BufReader<File>>>,
    pending: VecDeque<String>,
}

impl Imports {
    fn empty() -> Self {
        Self {
            lines: None,
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for Imports {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(path) = self.pending.pop_front() {
                return Some(path);
            }
            let lines = self.lines.as_mut()?;
            match lines.next() {
                Some(Ok(bytes)) => {
                    let line = String::from_utf8_lossy(&bytes);
                    self.pending.extend(scan_line(line.trim_end_matches('\r')));
                }
                Some(Err(e)) => {
                    debug!("Stopped reading imports: {e}");
                    self.lines = None;
                }
                None => self.lines = None,
            }
        }
    }
}
