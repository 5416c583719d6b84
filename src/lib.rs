//! # charter-diff
//!
//! A library for aligning two editions of a chaptered legal document.
//!
//! Constitutions and statutes are republished many times. Between editions,
//! sections are reworded, added, repealed, renumbered, and moved between
//! chapters whose headings themselves drift. Comparing editions line by line
//! does not work.
//!
//! `charter-diff` solves this by resolving every chapter heading onto a fixed
//! taxonomy, matching sections by content similarity within each category,
//! and then re-pairing leftovers across categories.
//!
//! ## Features
//!
//! - **Fuzzy content matching**: Bigram similarity tolerant of OCR noise
//! - **Heading resolution**: Reworded chapter titles converge on canonical categories
//! - **Move detection**: Sections that changed chapter are still paired
//! - **Bounded cost**: Large orphan sets fall back to exact-text matching
//! - **Stable ordering**: Rows grouped by category, ordered by section number
//!
//! ## Example
//!
//! ```rust,no_run
//! use charter_diff::{AlignmentEngine, AlignmentSummary, CategoryTable, Section};
//!
//! // Load the embedded canonical taxonomy
//! let table = CategoryTable::load_embedded().unwrap();
//!
//! let left = vec![Section::new("1", "The King shall reign").with_chapter("Monarchy")];
//! let right = vec![Section::new("1", "The King shall reign").with_chapter("The King")];
//!
//! // Align the two editions
//! let engine = AlignmentEngine::new(&table);
//! let rows = engine.align(&left, &right);
//!
//! let summary = AlignmentSummary::from_rows(&rows);
//! println!("{} matched, {} modified", summary.matched, summary.modified);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for sections, categories, and rows
//! - [`taxonomy`]: Canonical category table storage
//! - [`matching`]: Alignment engine and scoring algorithms
//! - [`parsing`]: Loaders for per-edition JSON and TSV files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod taxonomy;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::category::CanonicalCategory;
pub use core::row::{ChapterMetadata, DiffRow};
pub use core::section::Section;
pub use core::types::*;
pub use matching::engine::{AlignmentConfig, AlignmentEngine};
pub use matching::resolver::{CategoryResolver, ResolvedCategory};
pub use matching::summary::AlignmentSummary;
pub use taxonomy::store::CategoryTable;
