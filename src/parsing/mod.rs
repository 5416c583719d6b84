//! Loaders that turn per-edition files into validated section lists.
//!
//! This module provides parsers for:
//!
//! - **Rich JSON**: An array of chapters, each carrying its sections and the
//!   chapter's generated summary and key-change notes
//! - **Flat JSON**: An array of sections, or an object with a `sections` array
//! - **TSV/CSV files**: Tabular `id, chapter, content` rows
//!
//! ## Example
//!
//! ```rust,no_run
//! use charter_diff::parsing::load_edition;
//! use std::path::Path;
//!
//! // Format is chosen by extension, JSON by default
//! let left = load_edition(Path::new("con2475.json")).unwrap();
//! let right = load_edition(Path::new("con2560.tsv")).unwrap();
//! ```
//!
//! ## Section Fields
//!
//! | Field | Description | Required |
//! |-------|-------------|----------|
//! | id | Section number, string or number | Yes |
//! | content | Section text | Yes |
//! | chapter_name | Chapter heading (alias `chapter`) | No |
//! | category_id | Pre-assigned canonical category | No |
//! | page_number | Page of the source scan | No |
//! | ai_summary | Chapter summary note | No |
//! | key_change | Chapter key-change note | No |

use std::path::Path;

use thiserror::Error;

use crate::core::section::Section;

pub mod edition;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid edition format: {0}")]
    InvalidFormat(String),

    #[error("Too many sections: {0} exceeds maximum allowed (100000)")]
    TooManySections(usize),
}

/// Load an edition file, choosing the parser from the file extension
///
/// # Errors
///
/// Returns the underlying parser's `ParseError`.
pub fn load_edition(path: &Path) -> Result<Vec<Section>, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let sections = match ext.as_deref() {
        Some("tsv" | "txt") => tsv::parse_tsv_file(path, '\t')?,
        Some("csv") => tsv::parse_tsv_file(path, ',')?,
        _ => edition::parse_edition_file(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        sections = sections.len(),
        "loaded edition"
    );
    Ok(sections)
}
