//! Statement filename conventions and directory discovery
//!
//! Two naming forms exist on disk: the unprefixed form `"Chase <Month>
//! <Day>.pdf"` produced by the bank, and the prefixed form
//! `"<NN>.<original name>"` produced by the rename pipeline. The merge
//! pipeline orders files by that numeric prefix.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use glob::{glob, Pattern};
use regex::Regex;

use crate::error::{Error, Result};

fn ordinal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.").expect("ordinal pattern is valid"))
}

/// Parse the ordinal from a leading `"<digits>."` prefix, if present.
///
/// ```
/// use statement_tools::statement::parse_ordinal;
///
/// assert_eq!(parse_ordinal("03.Chase June 5.pdf"), Some(3));
/// assert_eq!(parse_ordinal("Chase June 5.pdf"), None);
/// ```
pub fn parse_ordinal(basename: &str) -> Option<u32> {
    let captures = ordinal_pattern().captures(basename)?;
    captures[1].parse().ok()
}

/// Render the prefixed form of a basename: `"<NN>.<basename>"` with a
/// 2-digit zero-padded ordinal.
pub fn prefixed_name(ordinal: usize, basename: &str) -> String {
    format!("{:02}.{}", ordinal, basename)
}

/// Discover unprefixed statement candidates in a directory.
///
/// Matches the glob `"Chase *.pdf"`; whether each match actually parses as a
/// dated statement is the rename pipeline's concern.
pub fn discover_unprefixed(directory: &Path) -> Result<Vec<PathBuf>> {
    glob_paths(directory, "Chase *.pdf")
}

/// Discover all statement PDFs in a directory (merge side).
///
/// Returns every `*.pdf` whose basename contains `"Chase"`, prefixed or not.
pub fn discover_statements(directory: &Path) -> Result<Vec<PathBuf>> {
    let paths = glob_paths(directory, "*.pdf")?;
    Ok(paths
        .into_iter()
        .filter(|p| basename(p).is_some_and(|name| name.contains("Chase")))
        .collect())
}

/// Basename of a path as UTF-8, or `None` for paths we cannot name.
pub fn basename(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}

fn glob_paths(directory: &Path, name_glob: &str) -> Result<Vec<PathBuf>> {
    // Metacharacters in the directory itself must match literally; only the
    // filename component is a wildcard
    let escaped = Pattern::escape(&directory.to_string_lossy());
    let pattern = Path::new(&escaped).join(name_glob);
    let pattern_str = pattern.to_string_lossy();
    let entries =
        glob(&pattern_str).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern_str, e)))?;

    // Unreadable entries are dropped rather than failing the whole scan
    Ok(entries.filter_map(|entry| entry.ok()).collect())
}
