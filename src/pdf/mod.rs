//! PDF manipulation module

pub mod extract;
pub mod merge;
pub mod metadata;

// Re-export commonly used items
pub use extract::{extract_to_workbook, ExtractReport};
pub use merge::{
    build_manifest, merge_statements, MergeManifest, MergeOptions, MergeReport,
    DEFAULT_OUTPUT_NAME,
};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
