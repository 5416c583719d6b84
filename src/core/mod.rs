//! Core data types for edition alignment.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Section`]: One numbered section of a document edition, with its chapter label
//! - [`CanonicalCategory`]: An entry in the fixed cross-edition chapter taxonomy
//! - [`DiffRow`]: One classified line of the comparison output
//! - [`CategoryId`], [`DiffStatus`]: Identifier and classification types
//!
//! ## Row Statuses
//!
//! | Status   | Left | Right | Meaning |
//! |----------|------|-------|---------|
//! | MATCH    | yes  | yes   | Similarity above the match cutoff |
//! | MODIFIED | yes  | yes   | Similarity above the candidate cutoff only |
//! | REMOVE   | yes  | no    | No counterpart in the right edition |
//! | ADD      | no   | yes   | No counterpart in the left edition |
//!
//! [`Section`]: section::Section
//! [`CanonicalCategory`]: category::CanonicalCategory
//! [`DiffRow`]: row::DiffRow
//! [`CategoryId`]: types::CategoryId
//! [`DiffStatus`]: types::DiffStatus

pub mod category;
pub mod row;
pub mod section;
pub mod types;
