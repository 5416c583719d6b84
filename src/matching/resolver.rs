use serde::Serialize;

use crate::core::section::Section;
use crate::core::types::{CategoryId, UNKNOWN_CATEGORY_TITLE};
use crate::matching::scoring::label_similarity;
use crate::taxonomy::store::CategoryTable;

/// Default minimum fuzzy score for a heading to map onto a canonical category
pub const DEFAULT_CATEGORY_THRESHOLD: f64 = 0.4;

/// Outcome of resolving one chapter heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCategory {
    pub id: CategoryId,

    /// Canonical display name, or the raw label for unmapped headings
    pub title: String,

    /// 1.0 for containment matches, the fuzzy score otherwise
    pub score: f64,

    /// False when the heading fell back to an unknown bucket
    pub canonical: bool,
}

impl ResolvedCategory {
    fn unknown(label: Option<&str>, score: f64) -> Self {
        match label {
            Some(label) => Self {
                id: CategoryId::unknown_for(label),
                title: label.to_string(),
                score,
                canonical: false,
            },
            None => Self {
                id: CategoryId::unknown(),
                title: UNKNOWN_CATEGORY_TITLE.to_string(),
                score: 0.0,
                canonical: false,
            },
        }
    }
}

/// Maps raw chapter headings onto the canonical taxonomy
pub struct CategoryResolver<'a> {
    table: &'a CategoryTable,
    threshold: f64,
}

impl<'a> CategoryResolver<'a> {
    /// Create a resolver with the default fuzzy threshold
    pub fn new(table: &'a CategoryTable) -> Self {
        Self {
            table,
            threshold: DEFAULT_CATEGORY_THRESHOLD,
        }
    }

    /// Create a resolver with a custom fuzzy threshold
    pub fn with_threshold(table: &'a CategoryTable, threshold: f64) -> Self {
        Self { table, threshold }
    }

    /// Resolve a chapter heading.
    ///
    /// 1. Containment: the heading contains, or is contained in, a category's
    ///    name or alias (case-insensitive). The first such category wins.
    /// 2. Fuzzy: the best [`label_similarity`] over all names and aliases,
    ///    accepted if it exceeds the threshold. Earlier categories win ties.
    /// 3. Otherwise an unknown bucket derived from the heading itself.
    #[must_use]
    pub fn resolve(&self, label: &str) -> ResolvedCategory {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return ResolvedCategory::unknown(None, 0.0);
        }
        let needle = trimmed.to_lowercase();

        for category in self.table.iter() {
            let contained = category.names().any(|name| {
                let name = name.trim().to_lowercase();
                !name.is_empty() && (needle.contains(&name) || name.contains(&needle))
            });
            if contained {
                return self.canonical(category.id.clone(), &category.name, 1.0);
            }
        }

        let mut best: Option<(&CategoryId, &str, f64)> = None;
        for category in self.table.iter() {
            for name in category.names() {
                let score = label_similarity(trimmed, name);
                if best.map_or(true, |(_, _, s)| score > s) {
                    best = Some((&category.id, category.name.as_str(), score));
                }
            }
        }

        match best {
            Some((id, name, score)) if score > self.threshold => {
                self.canonical(id.clone(), name, score)
            }
            Some((_, _, score)) => ResolvedCategory::unknown(Some(trimmed), score),
            None => ResolvedCategory::unknown(Some(trimmed), 0.0),
        }
    }

    /// Resolve a section: a pre-assigned canonical id wins, otherwise its heading
    #[must_use]
    pub fn resolve_section(&self, section: &Section) -> ResolvedCategory {
        if let Some(id) = section.category_id.as_deref() {
            let id = CategoryId::new(id.trim());
            if let Some(category) = self.table.get(&id) {
                return self.canonical(id, &category.name, 1.0);
            }
        }

        match section.label() {
            Some(label) => self.resolve(label),
            None => ResolvedCategory::unknown(None, 0.0),
        }
    }

    fn canonical(&self, id: CategoryId, name: &str, score: f64) -> ResolvedCategory {
        ResolvedCategory {
            id,
            title: name.to_string(),
            score,
            canonical: true,
        }
    }
}
