//! Statement merging using lopdf
//!
//! Concatenates prefixed statement PDFs in ordinal order into a single
//! output document. Individual files that fail to load are recorded in the
//! report and skipped; only a run with zero successes aborts.
//!
//! The object-level merge follows the lopdf merge example:
//! https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::pdf::metadata::count_pages;
use crate::statement;

/// Default basename for the merged output document
pub const DEFAULT_OUTPUT_NAME: &str = "merged_statements.pdf";

/// Options for merging statements
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory holding the prefixed statement files
    pub directory: PathBuf,
    /// Basename of the output document, written into `directory`
    pub output_name: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

/// One ordinal-tagged merge candidate
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// Path of the statement file
    pub path: PathBuf,
    /// Ordinal parsed from the leading `"<digits>."` prefix
    pub ordinal: u32,
}

/// The ordered set of prefixed files considered for concatenation.
///
/// Files whose basename contains `"Chase"` but carries no parseable ordinal
/// prefix land in `unprefixed`; they are excluded from the merge entirely
/// rather than merged in arbitrary order.
#[derive(Debug, Clone)]
pub struct MergeManifest {
    /// Candidates in ascending ordinal order
    pub entries: Vec<ManifestEntry>,
    /// Basenames excluded for lacking an ordinal prefix
    pub unprefixed: Vec<String>,
}

/// A successfully merged input file
#[derive(Debug, Clone)]
pub struct MergedFile {
    /// Basename of the input
    pub name: String,
    /// Ordinal it was merged under
    pub ordinal: u32,
    /// Pages it contributed
    pub pages: usize,
}

/// A per-file merge failure
#[derive(Debug, Clone)]
pub struct MergeFailure {
    /// Basename of the failed input
    pub name: String,
    /// Error message recorded for the summary
    pub error: String,
}

/// Summary of one merge run
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Inputs merged, in merge order
    pub merged: Vec<MergedFile>,
    /// Inputs that failed to open or validate
    pub failures: Vec<MergeFailure>,
    /// Path the merged document was written to
    pub output: PathBuf,
    /// Page count of the written output, re-read from disk
    pub output_pages: usize,
}

impl MergeReport {
    /// Sum of pages contributed by the merged inputs
    pub fn total_pages(&self) -> usize {
        self.merged.iter().map(|f| f.pages).sum()
    }
}

/// Build the merge manifest for a directory.
///
/// Discovers every PDF whose basename contains `"Chase"`, tags each with its
/// parsed ordinal, and sorts ascending. Errors only when no candidates exist
/// at all.
pub fn build_manifest(directory: &Path) -> Result<MergeManifest> {
    let candidates = statement::discover_statements(directory)?;
    if candidates.is_empty() {
        return Err(Error::NoFilesMatched(format!(
            "{}/*.pdf",
            directory.display()
        )));
    }

    let mut entries = Vec::new();
    let mut unprefixed = Vec::new();
    for path in candidates {
        let Some(name) = statement::basename(&path) else {
            continue;
        };
        match statement::parse_ordinal(name) {
            Some(ordinal) => entries.push(ManifestEntry { path, ordinal }),
            None => unprefixed.push(name.to_string()),
        }
    }
    entries.sort_by_key(|e| e.ordinal);

    Ok(MergeManifest {
        entries,
        unprefixed,
    })
}

/// Merge the manifest's files into a single document.
///
/// Each input is loaded, validated, and folded into the accumulated object
/// set; a failing input is recorded and the loop continues. If at least one
/// input succeeded the merged document is written to the configured output
/// path and re-read to verify it; if none did, no output file is produced
/// and [`Error::NothingMerged`] is returned.
pub fn merge_statements(manifest: &MergeManifest, options: &MergeOptions) -> Result<MergeReport> {
    // Accumulated state across inputs, per the lopdf merge example
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    let mut merged = Vec::new();
    let mut failures = Vec::new();

    for entry in &manifest.entries {
        let name = statement::basename(&entry.path)
            .unwrap_or("<unnameable>")
            .to_string();

        // The Document is dropped at the end of each iteration, success or
        // failure, so no handles persist across the loop.
        match load_statement(&entry.path) {
            Ok(mut doc) => {
                // Renumber objects in this document to avoid conflicts
                doc.renumber_objects_with(max_id);
                max_id = doc.max_id + 1;

                let pages = doc.get_pages();
                let page_count = pages.len();
                page_ids.extend(pages.into_values());
                objects.extend(doc.objects);

                merged.push(MergedFile {
                    name,
                    ordinal: entry.ordinal,
                    pages: page_count,
                });
            }
            Err(e) => failures.push(MergeFailure {
                name,
                error: e.to_string(),
            }),
        }
    }

    if merged.is_empty() {
        return Err(Error::NothingMerged);
    }

    let mut merged_doc = assemble_document(objects, page_ids, max_id);

    let output = options.directory.join(&options.output_name);
    merged_doc.compress();
    merged_doc.save(&output)?;

    // Verify the output is itself a readable document
    let output_pages = count_pages(&output)?;

    Ok(MergeReport {
        merged,
        failures,
        output,
        output_pages,
    })
}

/// Load one input and validate it has pages
fn load_statement(path: &Path) -> Result<Document> {
    let doc = Document::load(path)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }
    Ok(doc)
}

/// Build the merged document around the accumulated objects and page IDs
fn assemble_document(
    objects: BTreeMap<ObjectId, Object>,
    page_ids: Vec<ObjectId>,
    max_id: u32,
) -> Document {
    let mut doc = Document::with_version("1.5");

    // Add all collected objects first, then set max_id to the highest ID we
    // just added so new_object_id() cannot collide with them.
    doc.objects.extend(objects);
    doc.max_id = max_id - 1;

    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    // Reparent every page onto the new Pages node
    for &page_id in &page_ids {
        if let Ok(page_object) = doc.get_object_mut(page_id) {
            if let Object::Dictionary(ref mut dict) = page_object {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_manifest_orders_by_ordinal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "10.Chase Oct 1.pdf");
        touch(dir.path(), "02.Chase Feb 1.pdf");
        touch(dir.path(), "01.Chase Jan 1.pdf");

        let manifest = build_manifest(dir.path()).unwrap();
        let ordinals: Vec<u32> = manifest.entries.iter().map(|e| e.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 10]);
    }

    #[test]
    fn test_manifest_excludes_unprefixed() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "01.Chase Jan 1.pdf");
        touch(dir.path(), "Chase Feb 1.pdf");

        let manifest = build_manifest(dir.path()).unwrap();
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.unprefixed, vec!["Chase Feb 1.pdf".to_string()]);
    }

    #[test]
    fn test_manifest_ignores_non_chase_pdfs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "01.Chase Jan 1.pdf");
        touch(dir.path(), "merged_statements.pdf");
        touch(dir.path(), "03.invoice.pdf");

        let manifest = build_manifest(dir.path()).unwrap();
        assert_eq!(manifest.entries.len(), 1);
        assert!(manifest.unprefixed.is_empty());
    }

    #[test]
    fn test_manifest_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = build_manifest(dir.path());
        assert!(matches!(result, Err(Error::NoFilesMatched(_))));
    }

    // Merge behavior against real documents is covered in tests/integration.rs
}
