//! Table and text extraction to a spreadsheet
//!
//! Pulls per-page text out of a statement PDF and writes an `.xlsx`
//! workbook: one worksheet per detected table, or a single two-column
//! (page, text) worksheet when no tables are found. Table detection is a
//! fixed-width heuristic over the extracted text; lines that split into two
//! or more cells on runs of whitespace are treated as table rows, and two
//! or more consecutive such lines form a table.

use std::mem;
use std::path::{Path, PathBuf};

use lopdf::Document;
use rust_xlsxwriter::Workbook;

use crate::error::{Error, Result};

/// A table detected in the extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    /// Rows of cells, in reading order
    pub rows: Vec<Vec<String>>,
}

/// Summary of one extraction run
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Pages in the input document
    pub pages: usize,
    /// Tables written to the workbook
    pub tables: usize,
    /// True when no tables were detected and the per-page text fallback
    /// sheet was written instead
    pub fallback: bool,
    /// Path of the written workbook
    pub output: PathBuf,
}

/// Extract tables (or fallback text) from a PDF into an xlsx workbook.
///
/// With no explicit `output`, the workbook is written alongside the input
/// with an `.xlsx` extension.
pub fn extract_to_workbook(pdf: &Path, output: Option<&Path>) -> Result<ExtractReport> {
    if !pdf.exists() {
        return Err(Error::FileNotFound(pdf.to_path_buf()));
    }
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| pdf.with_extension("xlsx"));

    let doc = Document::load(pdf)?;
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(Error::EmptyPdf(pdf.to_path_buf()));
    }

    // A page whose text cannot be decoded contributes an empty blob rather
    // than failing the run
    let page_texts: Vec<String> = page_numbers
        .iter()
        .map(|&page| doc.extract_text(&[page]).unwrap_or_default())
        .collect();

    let tables: Vec<TableBlock> = page_texts
        .iter()
        .flat_map(|text| detect_tables(text))
        .collect();

    let mut workbook = Workbook::new();
    let fallback = tables.is_empty();
    if fallback {
        write_text_sheet(&mut workbook, &page_texts)?;
    } else {
        write_table_sheets(&mut workbook, &tables)?;
    }
    workbook.save(&output)?;

    Ok(ExtractReport {
        pages: page_texts.len(),
        tables: tables.len(),
        fallback,
        output,
    })
}

/// Detect table blocks in one page of extracted text.
///
/// A line is a table row when it splits into at least two cells on runs of
/// two or more spaces; at least two consecutive rows make a table.
pub fn detect_tables(text: &str) -> Vec<TableBlock> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            current.push(cells);
        } else {
            flush_table(&mut tables, &mut current);
        }
    }
    flush_table(&mut tables, &mut current);

    tables
}

fn flush_table(tables: &mut Vec<TableBlock>, current: &mut Vec<Vec<String>>) {
    if current.len() >= 2 {
        tables.push(TableBlock {
            rows: mem::take(current),
        });
    } else {
        current.clear();
    }
}

/// Split a line into cells on runs of two or more spaces
fn split_cells(line: &str) -> Vec<String> {
    line.trim()
        .split("  ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_table_sheets(workbook: &mut Workbook, tables: &[TableBlock]) -> Result<()> {
    for (index, table) in tables.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(format!("Table_{}", index + 1))?;
        for (row, cells) in table.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                sheet.write_string(row as u32, col as u16, cell)?;
            }
        }
    }
    Ok(())
}

fn write_text_sheet(workbook: &mut Workbook, page_texts: &[String]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Text")?;
    sheet.write_string(0, 0, "Page")?;
    sheet.write_string(0, 1, "Text")?;
    for (index, text) in page_texts.iter().enumerate() {
        let row = (index + 1) as u32;
        sheet.write_number(row, 0, (index + 1) as f64)?;
        sheet.write_string(row, 1, text)?;
    }
    Ok(())
}
