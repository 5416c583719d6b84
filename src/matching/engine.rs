use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::row::DiffRow;
use crate::core::section::Section;
use crate::core::types::{CategoryId, DiffStatus};
use crate::matching::assembly::assemble_rows;
use crate::matching::intra::match_within_category;
use crate::matching::orphans::{resolve_orphans, OrphanStrategy};
use crate::matching::resolver::{CategoryResolver, ResolvedCategory, DEFAULT_CATEGORY_THRESHOLD};
use crate::taxonomy::store::CategoryTable;
use crate::utils::validation::{validate_threshold, ValidationError};

/// Default minimum similarity for two sections to be paired at all
pub const DEFAULT_CANDIDATE_THRESHOLD: f64 = 0.55;

/// Default similarity above which a pair counts as unchanged
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

/// Default number of orphan pair evaluations before falling back to exact matching
pub const DEFAULT_COMPLEXITY_CEILING: usize = 2000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Tunable cutoffs for the alignment.
///
/// The defaults were tuned by hand against scanned constitution editions and
/// may need revisiting for other corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Pairs scoring at or below this are never matched
    pub candidate_threshold: f64,
    /// Pairs scoring above this are MATCH, the rest MODIFIED
    pub match_threshold: f64,
    /// Minimum fuzzy score for a chapter heading to map onto the taxonomy
    pub category_threshold: f64,
    /// Orphan pair count at which the cross-category pass degrades to exact matching
    pub complexity_ceiling: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            candidate_threshold: DEFAULT_CANDIDATE_THRESHOLD,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            category_threshold: DEFAULT_CATEGORY_THRESHOLD,
            complexity_ceiling: DEFAULT_COMPLEXITY_CEILING,
        }
    }
}

impl AlignmentConfig {
    /// Check that all cutoffs are usable
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a threshold lies outside [0, 1], the
    /// candidate threshold exceeds the match threshold, or the ceiling is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_threshold("candidate threshold", self.candidate_threshold)?;
        validate_threshold("match threshold", self.match_threshold)?;
        validate_threshold("category threshold", self.category_threshold)?;

        if self.candidate_threshold > self.match_threshold {
            return Err(ValidationError::ThresholdOrder {
                candidate: self.candidate_threshold,
                matched: self.match_threshold,
            });
        }
        if self.complexity_ceiling == 0 {
            return Err(ValidationError::ZeroComplexityCeiling);
        }
        Ok(())
    }

    /// Load and validate a config from a JSON file; missing fields keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Full result of one alignment
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Final ordered rows
    pub rows: Vec<DiffRow>,

    /// Strategy used by the cross-category pass
    pub orphan_strategy: OrphanStrategy,
}

/// Sections of both editions that resolved to one category
struct CategoryBucket<'s> {
    category: ResolvedCategory,
    left: Vec<&'s Section>,
    right: Vec<&'s Section>,
}

/// The main alignment engine
pub struct AlignmentEngine<'a> {
    table: &'a CategoryTable,
    /// Cutoffs used by every stage
    config: AlignmentConfig,
}

impl<'a> AlignmentEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(table: &'a CategoryTable) -> Self {
        Self {
            table,
            config: AlignmentConfig::default(),
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(table: &'a CategoryTable, config: AlignmentConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Align two editions and return the ordered comparison rows
    #[must_use]
    pub fn align(&self, left: &[Section], right: &[Section]) -> Vec<DiffRow> {
        self.align_detailed(left, right).rows
    }

    /// Align two editions, also reporting how orphans were handled
    #[must_use]
    pub fn align_detailed(&self, left: &[Section], right: &[Section]) -> Alignment {
        // Step 1: Resolve categories and bucket sections, in first-appearance order
        let buckets = self.bucket_sections(left, right);
        tracing::debug!(
            left = left.len(),
            right = right.len(),
            categories = buckets.len(),
            "grouped sections by category"
        );

        // Step 2: Match within each category
        let mut rows = Vec::with_capacity(left.len() + right.len());
        let mut orphans_left = Vec::new();
        let mut orphans_right = Vec::new();
        for bucket in &buckets {
            for row in match_within_category(&bucket.category, &bucket.left, &bucket.right, &self.config) {
                match row.status {
                    DiffStatus::Remove => orphans_left.push(row),
                    DiffStatus::Add => orphans_right.push(row),
                    DiffStatus::Match | DiffStatus::Modified => rows.push(row),
                }
            }
        }

        // Step 3: Re-pair orphans across category boundaries
        let resolution = resolve_orphans(orphans_left, orphans_right, &self.config);
        rows.extend(resolution.merged);
        rows.extend(resolution.unmatched_left);
        rows.extend(resolution.unmatched_right);

        // Step 4: Group by category and order by section number
        Alignment {
            rows: assemble_rows(rows, self.table),
            orphan_strategy: resolution.strategy,
        }
    }

    fn bucket_sections<'s>(&self, left: &'s [Section], right: &'s [Section]) -> Vec<CategoryBucket<'s>> {
        let resolver = CategoryResolver::with_threshold(self.table, self.config.category_threshold);

        // Editions repeat the same heading for every section of a chapter
        let mut cache: HashMap<(Option<&'s str>, Option<&'s str>), ResolvedCategory> = HashMap::new();
        let mut buckets: Vec<CategoryBucket<'s>> = Vec::new();
        let mut index: HashMap<CategoryId, usize> = HashMap::new();

        let tagged = left
            .iter()
            .map(|s| (s, true))
            .chain(right.iter().map(|s| (s, false)));

        for (section, is_left) in tagged {
            let key = (section.category_id.as_deref(), section.label());
            let resolved = cache
                .entry(key)
                .or_insert_with(|| resolver.resolve_section(section));

            let slot = *index.entry(resolved.id.clone()).or_insert_with(|| {
                buckets.push(CategoryBucket {
                    category: resolved.clone(),
                    left: Vec::new(),
                    right: Vec::new(),
                });
                buckets.len() - 1
            });

            if is_left {
                buckets[slot].left.push(section);
            } else {
                buckets[slot].right.push(section);
            }
        }

        buckets
    }
}
