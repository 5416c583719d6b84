use std::collections::HashMap;

use serde::Serialize;

use crate::core::row::DiffRow;
use crate::core::types::{CategoryId, DiffStatus};
use crate::matching::scoring::count_to_f64;

/// Row counts for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: String,
    pub matched: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
}

impl CategorySummary {
    fn record(&mut self, status: DiffStatus) {
        match status {
            DiffStatus::Match => self.matched += 1,
            DiffStatus::Modified => self.modified += 1,
            DiffStatus::Add => self.added += 1,
            DiffStatus::Remove => self.removed += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.matched + self.modified + self.added + self.removed
    }
}

/// Overview of an alignment result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentSummary {
    pub total_rows: usize,
    pub matched: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,

    /// Pairs found only by the cross-category pass
    pub cross_category: usize,

    /// Per-category breakdown, in row order
    pub categories: Vec<CategorySummary>,
}

impl AlignmentSummary {
    #[must_use]
    pub fn from_rows(rows: &[DiffRow]) -> Self {
        let mut summary = Self {
            total_rows: rows.len(),
            ..Self::default()
        };
        let mut index: HashMap<&CategoryId, usize> = HashMap::new();

        for row in rows {
            match row.status {
                DiffStatus::Match => summary.matched += 1,
                DiffStatus::Modified => summary.modified += 1,
                DiffStatus::Add => summary.added += 1,
                DiffStatus::Remove => summary.removed += 1,
            }
            if row.is_cross_category() {
                summary.cross_category += 1;
            }

            let slot = *index.entry(&row.category_id).or_insert_with(|| {
                summary.categories.push(CategorySummary {
                    id: row.category_id.clone(),
                    title: row.category_title.clone(),
                    matched: 0,
                    modified: 0,
                    added: 0,
                    removed: 0,
                });
                summary.categories.len() - 1
            });
            summary.categories[slot].record(row.status);
        }

        summary
    }

    /// Fraction of left sections that survive into the right edition (MATCH or MODIFIED)
    #[must_use]
    pub fn retention(&self) -> f64 {
        let left_total = self.matched + self.modified + self.removed;
        if left_total == 0 {
            0.0
        } else {
            count_to_f64(self.matched + self.modified) / count_to_f64(left_total)
        }
    }

    /// True when every row is a MATCH
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.matched == self.total_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::row::ChapterMetadata;
    use crate::core::section::Section;

    fn rows() -> Vec<DiffRow> {
        let general = CategoryId::new("general");
        let transitory = CategoryId::new("transitory");
        let meta = ChapterMetadata::default();

        let mut moved = DiffRow::paired(
            &transitory,
            "Transitory Provisions",
            Section::new("3", "same"),
            Section::new("200", "same"),
            1.0,
            0.85,
            meta.clone(),
        );
        moved.origin_category_id = Some(general.clone());

        vec![
            DiffRow::paired(
                &general,
                "General Provisions",
                Section::new("1", "a"),
                Section::new("1", "a"),
                1.0,
                0.85,
                meta.clone(),
            ),
            DiffRow::paired(
                &general,
                "General Provisions",
                Section::new("2", "b"),
                Section::new("2", "c"),
                0.6,
                0.85,
                meta.clone(),
            ),
            DiffRow::removed(&general, "General Provisions", Section::new("4", "d"), meta.clone()),
            moved,
            DiffRow::added(&transitory, "Transitory Provisions", Section::new("201", "e"), meta),
        ]
    }

    #[test]
    fn test_counts() {
        let summary = AlignmentSummary::from_rows(&rows());

        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.cross_category, 1);
        assert!(!summary.is_identical());
    }

    #[test]
    fn test_per_category() {
        let summary = AlignmentSummary::from_rows(&rows());

        assert_eq!(summary.categories.len(), 2);
        let general = &summary.categories[0];
        assert_eq!(general.id.as_str(), "general");
        assert_eq!(general.matched, 1);
        assert_eq!(general.modified, 1);
        assert_eq!(general.removed, 1);
        assert_eq!(general.total(), 3);

        let transitory = &summary.categories[1];
        assert_eq!(transitory.title, "Transitory Provisions");
        assert_eq!(transitory.matched, 1);
        assert_eq!(transitory.added, 1);
    }

    #[test]
    fn test_retention() {
        let summary = AlignmentSummary::from_rows(&rows());
        // 3 of 4 left sections have a counterpart
        assert!((summary.retention() - 0.75).abs() < 1e-9);
        assert!(AlignmentSummary::from_rows(&[]).retention().abs() < f64::EPSILON);
    }
}
