//! Rename pipeline
//!
//! Assigns each dated statement a 2-digit ordinal prefix by chronological
//! rank. The pipeline is two-phase: [`plan_renames`] computes and validates
//! the full old-to-new mapping without touching the filesystem, then
//! [`apply_renames`] performs the renames. Validation failures abort before
//! any file moves; a mid-apply rename failure propagates with no rollback.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::date::{extract_statement_date, YearWindow};
use crate::error::{Error, Result};
use crate::statement;

/// One planned rename
#[derive(Debug, Clone)]
pub struct RenameEntry {
    /// Current path of the statement file
    pub from: PathBuf,
    /// Destination path with the ordinal prefix applied
    pub to: PathBuf,
    /// Date extracted from the basename
    pub date: NaiveDate,
    /// 1-based chronological rank
    pub ordinal: usize,
}

/// A validated rename plan for one directory
#[derive(Debug, Clone)]
pub struct RenamePlan {
    /// Renames in ordinal order
    pub entries: Vec<RenameEntry>,
    /// Basenames that matched the glob but yielded no date
    pub skipped: Vec<String>,
}

/// Compute the rename plan for a directory.
///
/// Discovers unprefixed candidates, extracts dates (undatable files land in
/// `skipped`), sorts ascending by date, and assigns contiguous 1-based
/// ordinals. The sort is stable; ties on equal dates keep discovery order,
/// which is unspecified.
///
/// Errors if no candidates match the naming convention at all, if two
/// entries map to the same destination, or if a destination already exists
/// on disk. Re-running on already-prefixed files is not supported: prefixed
/// names simply fail date extraction and are skipped.
pub fn plan_renames(directory: &Path, years: &YearWindow) -> Result<RenamePlan> {
    let candidates = statement::discover_unprefixed(directory)?;
    if candidates.is_empty() {
        return Err(Error::NoFilesMatched(format!(
            "{}/Chase *.pdf",
            directory.display()
        )));
    }

    let mut dated: Vec<(PathBuf, NaiveDate)> = Vec::new();
    let mut skipped = Vec::new();
    for path in candidates {
        let Some(name) = statement::basename(&path) else {
            continue;
        };
        match extract_statement_date(name, years) {
            Some(date) => dated.push((path.clone(), date)),
            None => skipped.push(name.to_string()),
        }
    }

    // Stable sort: equal dates keep discovery order
    dated.sort_by_key(|(_, date)| *date);

    let mut entries = Vec::with_capacity(dated.len());
    for (index, (from, date)) in dated.into_iter().enumerate() {
        let ordinal = index + 1;
        let name = statement::basename(&from)
            .ok_or_else(|| Error::General(format!("unnameable path: {}", from.display())))?;
        let to = from.with_file_name(statement::prefixed_name(ordinal, name));
        entries.push(RenameEntry {
            from,
            to,
            date,
            ordinal,
        });
    }

    validate_destinations(&entries)?;

    Ok(RenamePlan { entries, skipped })
}

/// Reject plans with colliding or pre-existing destinations before any
/// rename happens.
fn validate_destinations(entries: &[RenameEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.to.clone()) {
            return Err(Error::DuplicateDestination(entry.to.clone()));
        }
        if entry.to.exists() {
            return Err(Error::DestinationExists(entry.to.clone()));
        }
    }
    Ok(())
}

/// Apply a rename plan.
///
/// Renames are performed in ordinal order; the first filesystem failure
/// propagates and earlier renames stay in place.
pub fn apply_renames(plan: &RenamePlan) -> Result<()> {
    for entry in &plan.entries {
        fs::rename(&entry.from, &entry.to)?;
    }
    Ok(())
}
