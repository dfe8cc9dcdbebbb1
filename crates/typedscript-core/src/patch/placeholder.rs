//! Placeholder markers embedded in template sources
//!
//! A marker is a block comment of the form `/* [[name]] */`. Feature handlers
//! replace markers with generated code; whatever is left after composition is
//! stripped by [`clear_all`].

use crate::error::{ScaffoldError, ScaffoldResult};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;
use walkdir::WalkDir;

/// Named insertion point inside a template file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker(&'static str);

impl Marker {
    /// Import block at the top of a module
    pub const IMPORTS: Marker = Marker("imports");
    /// Application setup, after the app instance exists and before routes
    pub const SETUP: Marker = Marker("setup");

    /// Literal text of the marker as it appears in files
    pub fn token(&self) -> String {
        format!("/* [[{}]] */", self.0)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Lines holding nothing but a marker
fn marker_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*/\*[ \t]*\[\[[A-Za-z0-9_-]+\]\][ \t]*\*/[ \t]*(?:\r?\n|$)")
            .expect("marker line pattern is valid")
    })
}

/// Any marker, including ones sharing a line with code
fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[ \t]*/\*[ \t]*\[\[[A-Za-z0-9_-]+\]\][ \t]*\*/")
            .expect("marker pattern is valid")
    })
}

/// Check whether text still contains a marker-shaped token
pub fn contains_marker(text: &str) -> bool {
    marker_pattern().is_match(text)
}

/// Remove every marker from a piece of text
pub fn strip_markers(text: &str) -> String {
    let without_lines = marker_line_pattern().replace_all(text, "");
    marker_pattern().replace_all(&without_lines, "").into_owned()
}

fn read_source(path: &Path) -> ScaffoldResult<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScaffoldError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ScaffoldError::io(path, e)),
    }
}

/// Replace the first occurrence of `marker` in `path` with `text`.
///
/// The marker is consumed; a second insertion at the same marker fails.
pub fn insert_at(path: &Path, marker: Marker, text: &str) -> ScaffoldResult<()> {
    let content = read_source(path)?;
    let token = marker.token();

    if !content.contains(&token) {
        return Err(ScaffoldError::MarkerNotFound {
            path: path.to_path_buf(),
            marker: token,
        });
    }

    let patched = content.replacen(&token, text, 1);
    std::fs::write(path, patched).map_err(|e| ScaffoldError::io(path, e))?;
    debug!("Patched {} at {}", path.display(), marker);
    Ok(())
}

/// Insert `text` on its own line just above `marker`, keeping the marker.
///
/// The new line takes the marker's indentation, so repeated insertions at
/// the same point stack up in call order.
pub fn insert_before(path: &Path, marker: Marker, text: &str) -> ScaffoldResult<()> {
    let content = read_source(path)?;
    let token = marker.token();

    let indent = content
        .find(&token)
        .map(|pos| {
            let line_start = content[..pos].rfind('\n').map_or(0, |i| i + 1);
            let prefix = &content[line_start..pos];
            if prefix.chars().all(|c| c == ' ' || c == '\t') {
                prefix.to_string()
            } else {
                String::new()
            }
        })
        .unwrap_or_default();

    insert_at(path, marker, &format!("{}\n{}{}", text, indent, token))
}

/// Strip every marker from all regular files under `dir`.
///
/// Lines that held only a marker are removed. Files that aren't valid UTF-8
/// are left untouched. Returns the number of files rewritten.
pub fn clear_all(dir: &Path) -> ScaffoldResult<usize> {
    let mut cleaned = 0;

    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules" && e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = std::fs::read(path).map_err(|e| ScaffoldError::io(path, e))?;
        let Ok(text) = String::from_utf8(bytes) else {
            continue;
        };

        if !contains_marker(&text) {
            continue;
        }

        std::fs::write(path, strip_markers(&text)).map_err(|e| ScaffoldError::io(path, e))?;
        debug!("Cleared placeholders in {}", path.display());
        cleaned += 1;
    }

    Ok(cleaned)
}
