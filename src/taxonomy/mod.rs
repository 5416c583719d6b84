//! Canonical chapter taxonomy storage.
//!
//! Editions of the same document name their chapters differently over time.
//! The taxonomy is a fixed, ordered list of canonical categories that every
//! chapter heading is resolved onto before sections are compared. An embedded
//! table is compiled into the binary, but custom tables can also be loaded
//! from JSON files.
//!
//! ## Embedded Taxonomy
//!
//! The default table covers the standard constitutional chapters, in order:
//! preamble, general provisions, monarchy, rights and liberties, state
//! policies, legislature, executive, judiciary, independent organs, local
//! administration, amendment, and transitory provisions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use charter_diff::CategoryTable;
//! use std::path::Path;
//!
//! // Load the embedded table
//! let table = CategoryTable::load_embedded().unwrap();
//! for category in table.iter() {
//!     println!("{}: {}", category.id, category.name);
//! }
//!
//! // Export it, edit it, and load the custom copy
//! let json = table.to_json().unwrap();
//! let custom = CategoryTable::load_from_file(Path::new("my_taxonomy.json")).unwrap();
//! ```

pub mod store;
