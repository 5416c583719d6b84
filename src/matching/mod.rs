//! Edition alignment engine and similarity scoring.
//!
//! This module provides the core alignment functionality:
//!
//! - [`AlignmentEngine`]: Main entry point, aligns two editions into rows
//! - [`CategoryResolver`]: Maps chapter headings onto the canonical taxonomy
//! - [`AlignmentSummary`]: Per-status and per-category counts over a result
//!
//! ## Alignment Algorithm
//!
//! The alignment runs in four sequential stages:
//!
//! 1. **Category resolution**: Each section's chapter heading is resolved to a
//!    canonical category by containment, then by fuzzy heading similarity
//! 2. **Intra-category matching**: Within each category every left/right pair
//!    above the candidate cutoff is scored, and pairs are accepted greedily
//!    by descending score
//! 3. **Cross-category orphan resolution**: Leftover REMOVE and ADD rows are
//!    re-paired across categories to catch sections whose chapter moved.
//!    Large orphan sets degrade to exact-text matching
//! 4. **Assembly**: Rows are grouped by category and ordered by section number
//!
//! Assignment is greedy, not an optimal bipartite matching. Equal scores
//! resolve in left-major order, so results are reproducible.
//!
//! ## Scoring
//!
//! Section similarity is the Dice coefficient over character bigrams with
//! whitespace removed, which tolerates OCR noise and light rewording.
//!
//! ## Example
//!
//! ```rust,no_run
//! use charter_diff::{AlignmentEngine, CategoryTable, Section};
//!
//! let table = CategoryTable::load_embedded().unwrap();
//! let engine = AlignmentEngine::new(&table);
//!
//! let left = vec![Section::new("9", "Courts shall be independent").with_chapter("Judicial Branch")];
//! let right = vec![Section::new("14", "The courts remain independent").with_chapter("Judiciary")];
//!
//! for row in engine.align(&left, &right) {
//!     println!("{} {} {:?}", row.status, row.category_title, row.score);
//! }
//! ```
//!
//! [`AlignmentEngine`]: engine::AlignmentEngine
//! [`CategoryResolver`]: resolver::CategoryResolver
//! [`AlignmentSummary`]: summary::AlignmentSummary

pub mod assembly;
pub mod engine;
pub mod intra;
pub mod orphans;
pub mod resolver;
pub mod scoring;
pub mod summary;
