//! Command-line interface for charter-diff.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **align**: Align two editions of a document section by section
//! - **resolve**: Show which canonical category a chapter heading maps to
//! - **score**: Print the similarity of two texts
//! - **taxonomy**: List or export the canonical category table
//!
//! ## Usage
//!
//! ```text
//! # Align two editions
//! charter-diff align con2475.json con2560.json
//!
//! # Only show what changed, as JSON for scripting
//! charter-diff align con2475.json con2560.json --changes-only --format json
//!
//! # Check how headings are classified
//! charter-diff resolve "Judicial Branch" "Rights and Freedoms"
//!
//! # Export the embedded taxonomy for editing
//! charter-diff taxonomy export my_taxonomy.json
//! ```

use clap::{Parser, Subcommand};

pub mod align;
pub mod resolve;
pub mod score;
pub mod taxonomy;

#[derive(Parser)]
#[command(name = "charter-diff")]
#[command(version)]
#[command(about = "Align two editions of a legal document section by section")]
#[command(
    long_about = "charter-diff compares two editions of a constitution or statute.\n\nSections are grouped into canonical chapter categories, paired by text similarity within each category, and then paired again across categories to catch sections that moved. Every section of both editions appears in exactly one output row marked MATCH, MODIFIED, ADD or REMOVE."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two editions and report per-section changes
    Align(align::AlignArgs),

    /// Resolve chapter headings to canonical categories
    Resolve(resolve::ResolveArgs),

    /// Score the similarity of two texts
    Score(score::ScoreArgs),

    /// Manage the canonical category table
    Taxonomy(taxonomy::TaxonomyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the category table from a file, or the embedded default
pub(crate) fn load_table(
    path: Option<&std::path::Path>,
) -> anyhow::Result<crate::taxonomy::store::CategoryTable> {
    use crate::taxonomy::store::CategoryTable;

    let table = match path {
        Some(path) => CategoryTable::load_from_file(path)?,
        None => CategoryTable::load_embedded()?,
    };
    Ok(table)
}

/// Shorten long text for one-line display
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    let flat: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let head: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
