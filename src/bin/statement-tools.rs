//! Statement Tools CLI
//!
//! A command-line tool for renaming, merging, and extracting bank
//! statement PDFs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use statement_tools::date::YearWindow;
use statement_tools::pdf::{
    build_manifest, extract_metadata, extract_to_workbook, merge_statements, MergeOptions,
    DEFAULT_OUTPUT_NAME,
};
use statement_tools::rename::{apply_renames, plan_renames};
use statement_tools::statement;

/// Statement Tools - Rename, merge, and extract bank statement PDFs
#[derive(Parser)]
#[command(name = "statement-tools")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Prefix statements in the current directory by date
    statement-tools rename

    # Preview the rename plan without touching any files
    statement-tools rename --dry-run

    # Merge prefixed statements into merged_statements.pdf
    statement-tools merge

    # Extract tables from one statement into a spreadsheet
    statement-tools extract \"01.Chase Jan 10.pdf\"")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename statements with chronological 2-digit ordinal prefixes
    Rename {
        /// Directory to operate on
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Year assigned to basenames carrying the "20" day suffix
        #[arg(long, default_value_t = 2020)]
        suffix_year: i32,

        /// Year assigned to basenames without the suffix
        #[arg(long, default_value_t = 2021)]
        default_year: i32,

        /// Print the rename plan without renaming anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge prefixed statements into one PDF, in ordinal order
    Merge {
        /// Directory to operate on
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Output filename, written into the directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
        output: String,
    },

    /// Extract tables (or page text) from a PDF into an xlsx workbook
    Extract {
        /// Input PDF file
        input: PathBuf,

        /// Output xlsx path (defaults to the input with an .xlsx extension)
        output: Option<PathBuf>,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rename {
            dir,
            suffix_year,
            default_year,
            dry_run,
        } => cmd_rename(dir, suffix_year, default_year, dry_run),
        Commands::Merge { dir, output } => cmd_merge(dir, output),
        Commands::Extract { input, output } => cmd_extract(input, output),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Rename statements in a directory by chronological order
fn cmd_rename(dir: PathBuf, suffix_year: i32, default_year: i32, dry_run: bool) -> Result<()> {
    let years = YearWindow {
        with_suffix: suffix_year,
        without_suffix: default_year,
    };

    let plan = plan_renames(&dir, &years)?;

    for name in &plan.skipped {
        eprintln!("Warning: Could not parse date from {}", name);
    }

    for entry in &plan.entries {
        let from = statement::basename(&entry.from).unwrap_or("?");
        let to = statement::basename(&entry.to).unwrap_or("?");
        println!("Renaming: {} -> {} (Date: {})", from, to, entry.date);
    }

    if dry_run {
        println!("Dry run: {} files would be renamed.", plan.entries.len());
        return Ok(());
    }

    apply_renames(&plan)?;
    println!("File renaming complete! {} files renamed.", plan.entries.len());

    Ok(())
}

/// Merge prefixed statements in ordinal order
fn cmd_merge(dir: PathBuf, output: String) -> Result<()> {
    let manifest = build_manifest(&dir)?;

    for name in &manifest.unprefixed {
        eprintln!("Warning: No number prefix found in {}, excluding", name);
    }

    println!("Files will be merged in this order:");
    for entry in &manifest.entries {
        let name = statement::basename(&entry.path).unwrap_or("?");
        println!("  [{:02}] {}", entry.ordinal, name);
    }

    let options = MergeOptions {
        directory: dir,
        output_name: output,
    };
    let report = merge_statements(&manifest, &options)?;

    for file in &report.merged {
        println!("  [{:02}] {}: {} pages", file.ordinal, file.name, file.pages);
    }

    if !report.failures.is_empty() {
        eprintln!("Files that couldn't be processed:");
        for failure in &report.failures {
            eprintln!("  - {}: {}", failure.name, failure.error);
        }
    }

    println!(
        "Merged {} of {} files ({} pages) to: {}",
        report.merged.len(),
        manifest.entries.len(),
        report.output_pages,
        report.output.display()
    );

    Ok(())
}

/// Extract tables from a PDF into a spreadsheet
fn cmd_extract(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("Processing: {}", input.display());
    let report = extract_to_workbook(&input, output.as_deref())?;

    if report.fallback {
        println!(
            "No tables detected; wrote per-page text for {} pages",
            report.pages
        );
    } else {
        println!("Extracted {} tables", report.tables);
    }
    println!("Created spreadsheet: {}", report.output.display());

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> Result<()> {
    let metadata = extract_metadata(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
