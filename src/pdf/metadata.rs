//! PDF metadata and page counting

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
}

/// Count pages by reading the Count field from the catalog's Pages node.
/// More reliable than get_pages() for documents with nested page trees.
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object(catalog_id)?.as_dict()?;
    let pages_id = catalog.get(b"Pages")?.as_reference()?;
    let pages = doc.get_object(pages_id)?.as_dict()?;
    let count = pages.get(b"Count")?.as_i64()?;
    Ok(count as usize)
}

/// Read a string entry from the trailer's Info dictionary, if present
fn info_string(doc: &Document, key: &[u8]) -> Option<String> {
    let info_id = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_object(info_id).ok()?.as_dict().ok()?;
    let bytes = info.get(key).ok()?.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(PdfMetadata {
        page_count,
        title: info_string(&doc, b"Title"),
        author: info_string(&doc, b"Author"),
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}
