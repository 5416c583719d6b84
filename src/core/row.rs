use serde::{Deserialize, Serialize};

use crate::core::section::Section;
use crate::core::types::{CategoryId, DiffStatus};

/// Chapter-level notes attached to a row.
///
/// `ai_summary` and `key_change` are the merged display values (right side
/// preferred, falling back to left); the side-specific fields keep both
/// editions' notes for side-by-side presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_key_change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_key_change: Option<String>,
}

impl ChapterMetadata {
    /// Build from the sections that represent each side's chapter
    #[must_use]
    pub fn from_sources(left: Option<&Section>, right: Option<&Section>) -> Self {
        Self::from_sides(
            left.and_then(|s| s.ai_summary.clone()),
            right.and_then(|s| s.ai_summary.clone()),
            left.and_then(|s| s.key_change.clone()),
            right.and_then(|s| s.key_change.clone()),
        )
    }

    /// Combine the left half of one row's notes with the right half of another's
    #[must_use]
    pub fn merge(left: &Self, right: &Self) -> Self {
        Self::from_sides(
            left.left_ai_summary.clone(),
            right.right_ai_summary.clone(),
            left.left_key_change.clone(),
            right.right_key_change.clone(),
        )
    }

    fn from_sides(
        left_ai_summary: Option<String>,
        right_ai_summary: Option<String>,
        left_key_change: Option<String>,
        right_key_change: Option<String>,
    ) -> Self {
        Self {
            ai_summary: right_ai_summary.clone().or_else(|| left_ai_summary.clone()),
            key_change: right_key_change.clone().or_else(|| left_key_change.clone()),
            left_ai_summary,
            right_ai_summary,
            left_key_change,
            right_key_change,
        }
    }
}

/// One line of the comparison: a matched pair or a one-sided orphan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRow {
    /// Unique key: `category::left::right`, `category::left::REMOVE` or `category::ADD::right`
    pub key: String,

    /// Section id shown for the row (left id when present)
    pub section_id: String,

    /// Resolved category the row is filed under
    pub category_id: CategoryId,

    /// Display title of that category
    pub category_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Section>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Section>,

    pub status: DiffStatus,

    /// Content similarity of a paired row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Original category of the left section when the pair was found across categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_category_id: Option<CategoryId>,

    #[serde(flatten)]
    pub metadata: ChapterMetadata,
}

impl DiffRow {
    /// A left/right pair; status comes from the score
    #[must_use]
    pub fn paired(
        category_id: &CategoryId,
        category_title: &str,
        left: Section,
        right: Section,
        score: f64,
        match_threshold: f64,
        metadata: ChapterMetadata,
    ) -> Self {
        Self {
            key: format!("{category_id}::{}::{}", left.id, right.id),
            section_id: left.id.clone(),
            category_id: category_id.clone(),
            category_title: category_title.to_string(),
            status: DiffStatus::from_score(score, match_threshold),
            left: Some(left),
            right: Some(right),
            score: Some(score),
            origin_category_id: None,
            metadata,
        }
    }

    /// A section only present in the left edition
    #[must_use]
    pub fn removed(
        category_id: &CategoryId,
        category_title: &str,
        left: Section,
        metadata: ChapterMetadata,
    ) -> Self {
        Self {
            key: format!("{category_id}::{}::REMOVE", left.id),
            section_id: left.id.clone(),
            category_id: category_id.clone(),
            category_title: category_title.to_string(),
            left: Some(left),
            right: None,
            status: DiffStatus::Remove,
            score: None,
            origin_category_id: None,
            metadata,
        }
    }

    /// A section only present in the right edition
    #[must_use]
    pub fn added(
        category_id: &CategoryId,
        category_title: &str,
        right: Section,
        metadata: ChapterMetadata,
    ) -> Self {
        Self {
            key: format!("{category_id}::ADD::{}", right.id),
            section_id: right.id.clone(),
            category_id: category_id.clone(),
            category_title: category_title.to_string(),
            left: None,
            right: Some(right),
            status: DiffStatus::Add,
            score: None,
            origin_category_id: None,
            metadata,
        }
    }

    /// Numeric ordering key: the left id when present, else the right id
    #[must_use]
    pub fn sort_number(&self) -> Option<f64> {
        self.left
            .as_ref()
            .or(self.right.as_ref())
            .and_then(Section::number)
    }

    #[must_use]
    pub fn is_cross_category(&self) -> bool {
        self.origin_category_id.is_some()
    }
}

/// Ordering on [`DiffRow::sort_number`] with non-numeric ids last
pub fn compare_sort_numbers(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> CategoryId {
        CategoryId::new("monarchy")
    }

    #[test]
    fn test_paired_row_keys_and_status() {
        let left = Section::new("3", "The King shall reign");
        let right = Section::new("4", "The King shall reign");
        let row = DiffRow::paired(
            &category(),
            "Monarchy",
            left,
            right,
            1.0,
            0.85,
            ChapterMetadata::default(),
        );

        assert_eq!(row.key, "monarchy::3::4");
        assert_eq!(row.section_id, "3");
        assert_eq!(row.status, DiffStatus::Match);
        assert_eq!(row.score, Some(1.0));
        assert!(!row.is_cross_category());
    }

    #[test]
    fn test_orphan_row_keys() {
        let removed = DiffRow::removed(
            &category(),
            "Monarchy",
            Section::new("7", "x"),
            ChapterMetadata::default(),
        );
        let added = DiffRow::added(
            &category(),
            "Monarchy",
            Section::new("8", "y"),
            ChapterMetadata::default(),
        );

        assert_eq!(removed.key, "monarchy::7::REMOVE");
        assert_eq!(removed.status, DiffStatus::Remove);
        assert!(removed.right.is_none());
        assert_eq!(added.key, "monarchy::ADD::8");
        assert_eq!(added.status, DiffStatus::Add);
        assert!(added.left.is_none());
    }

    #[test]
    fn test_metadata_prefers_right() {
        let left = Section::new("1", "a").with_summary("old").with_key_change("left only");
        let right = Section::new("1", "a").with_summary("new");
        let meta = ChapterMetadata::from_sources(Some(&left), Some(&right));

        assert_eq!(meta.ai_summary.as_deref(), Some("new"));
        assert_eq!(meta.left_ai_summary.as_deref(), Some("old"));
        assert_eq!(meta.right_ai_summary.as_deref(), Some("new"));
        assert_eq!(meta.key_change.as_deref(), Some("left only"));
        assert!(meta.right_key_change.is_none());
    }

    #[test]
    fn test_metadata_merge_takes_each_side() {
        let from_left_row = ChapterMetadata::from_sources(
            Some(&Section::new("1", "a").with_summary("left chapter")),
            Some(&Section::new("1", "a").with_summary("ignored")),
        );
        let from_right_row =
            ChapterMetadata::from_sources(None, Some(&Section::new("2", "b").with_summary("right chapter")));

        let merged = ChapterMetadata::merge(&from_left_row, &from_right_row);
        assert_eq!(merged.left_ai_summary.as_deref(), Some("left chapter"));
        assert_eq!(merged.right_ai_summary.as_deref(), Some("right chapter"));
        assert_eq!(merged.ai_summary.as_deref(), Some("right chapter"));
    }

    #[test]
    fn test_compare_sort_numbers() {
        use std::cmp::Ordering;
        assert_eq!(compare_sort_numbers(Some(1.0), Some(2.0)), Ordering::Less);
        assert_eq!(compare_sort_numbers(Some(5.0), None), Ordering::Less);
        assert_eq!(compare_sort_numbers(None, Some(5.0)), Ordering::Greater);
        assert_eq!(compare_sort_numbers(None, None), Ordering::Equal);
    }
}
