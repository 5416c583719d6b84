use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::core::row::{ChapterMetadata, DiffRow};
use crate::matching::engine::AlignmentConfig;
use crate::matching::intra::{candidate_edges, greedy_assign, Candidate};
use crate::matching::scoring::similarity;

/// How orphans were compared across categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanStrategy {
    /// No orphans on one side, nothing to compare
    Skipped,
    /// Every left/right orphan pair was scored
    Fuzzy,
    /// Too many pairs; only identical (trimmed) texts were paired
    Exact,
}

/// Outcome of the cross-category pass
#[derive(Debug, Clone)]
pub struct OrphanResolution {
    /// Newly paired rows, filed under the right-hand row's category
    pub merged: Vec<DiffRow>,

    /// REMOVE rows that found no partner, unchanged
    pub unmatched_left: Vec<DiffRow>,

    /// ADD rows that found no partner, unchanged
    pub unmatched_right: Vec<DiffRow>,

    pub strategy: OrphanStrategy,
}

/// Pick the comparison strategy from the number of pair evaluations needed
#[must_use]
pub fn choose_strategy(left: usize, right: usize, complexity_ceiling: usize) -> OrphanStrategy {
    if left == 0 || right == 0 {
        OrphanStrategy::Skipped
    } else if left.saturating_mul(right) < complexity_ceiling {
        OrphanStrategy::Fuzzy
    } else {
        OrphanStrategy::Exact
    }
}

/// Re-pair REMOVE and ADD rows left over from per-category matching.
///
/// Catches sections whose chapter was renamed or restructured between
/// editions. Pairs are accepted greedily by descending score, as within a
/// category, and classified MATCH/MODIFIED by the same cutoffs.
#[must_use]
pub fn resolve_orphans(
    orphans_left: Vec<DiffRow>,
    orphans_right: Vec<DiffRow>,
    config: &AlignmentConfig,
) -> OrphanResolution {
    let strategy = choose_strategy(
        orphans_left.len(),
        orphans_right.len(),
        config.complexity_ceiling,
    );

    let candidates = match strategy {
        OrphanStrategy::Skipped => Vec::new(),
        OrphanStrategy::Fuzzy => {
            let left_texts: Vec<&str> = orphans_left.iter().map(left_text).collect();
            let right_texts: Vec<&str> = orphans_right.iter().map(right_text).collect();
            candidate_edges(&left_texts, &right_texts, config.candidate_threshold)
        }
        OrphanStrategy::Exact => {
            exact_candidates(&orphans_left, &orphans_right, config.candidate_threshold)
        }
    };
    let accepted = greedy_assign(candidates, orphans_left.len(), orphans_right.len());

    tracing::debug!(
        strategy = ?strategy,
        left = orphans_left.len(),
        right = orphans_right.len(),
        merged = accepted.len(),
        "resolved cross-category orphans"
    );

    let mut partner_of_left: Vec<Option<Candidate>> = vec![None; orphans_left.len()];
    for candidate in accepted {
        partner_of_left[candidate.left] = Some(candidate);
    }

    let mut right_taken = vec![false; orphans_right.len()];
    let mut merged = Vec::new();
    let mut unmatched_left = Vec::new();
    for (left_row, partner) in orphans_left.into_iter().zip(partner_of_left) {
        let merged_row = partner.and_then(|candidate| {
            let row = merge_rows(
                &left_row,
                &orphans_right[candidate.right],
                candidate.score,
                config.match_threshold,
            )?;
            right_taken[candidate.right] = true;
            Some(row)
        });
        match merged_row {
            Some(row) => merged.push(row),
            None => unmatched_left.push(left_row),
        }
    }

    let unmatched_right = orphans_right
        .into_iter()
        .zip(right_taken)
        .filter_map(|(row, taken)| (!taken).then_some(row))
        .collect();

    OrphanResolution {
        merged,
        unmatched_left,
        unmatched_right,
        strategy,
    }
}

fn left_text(row: &DiffRow) -> &str {
    row.left.as_ref().map_or("", |s| s.content.as_str())
}

fn right_text(row: &DiffRow) -> &str {
    row.right.as_ref().map_or("", |s| s.content.as_str())
}

/// Pair orphans whose trimmed texts are identical.
///
/// Right orphans sharing one text are handed out in their original order.
/// Pairs must still score above the candidate threshold.
fn exact_candidates(
    orphans_left: &[DiffRow],
    orphans_right: &[DiffRow],
    threshold: f64,
) -> Vec<Candidate> {
    let mut by_text: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (r, row) in orphans_right.iter().enumerate() {
        if row.right.is_some() {
            by_text.entry(right_text(row).trim()).or_default().push_back(r);
        }
    }

    let mut candidates = Vec::new();
    for (l, row) in orphans_left.iter().enumerate() {
        if row.left.is_none() {
            continue;
        }
        // Keys are equal trimmed texts, so this is the pair's score
        let text = left_text(row).trim();
        let score = similarity(text, text);
        if score <= threshold {
            continue;
        }
        if let Some(r) = by_text.get_mut(text).and_then(VecDeque::pop_front) {
            candidates.push(Candidate {
                left: l,
                right: r,
                score,
            });
        }
    }
    candidates
}

/// Join a REMOVE row and an ADD row into one paired row.
///
/// The pair is filed under the right-hand (destination) category; both
/// sides' chapter notes are kept. Returns `None` if either row lacks its side.
fn merge_rows(
    left_row: &DiffRow,
    right_row: &DiffRow,
    score: f64,
    match_threshold: f64,
) -> Option<DiffRow> {
    let left = left_row.left.clone()?;
    let right = right_row.right.clone()?;

    let mut row = DiffRow::paired(
        &right_row.category_id,
        &right_row.category_title,
        left,
        right,
        score,
        match_threshold,
        ChapterMetadata::merge(&left_row.metadata, &right_row.metadata),
    );
    if left_row.category_id != right_row.category_id {
        row.origin_category_id = Some(left_row.category_id.clone());
    }
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::Section;
    use crate::core::types::{CategoryId, DiffStatus};
    use crate::matching::engine::DEFAULT_COMPLEXITY_CEILING;

    fn removed(category: &str, id: &str, content: &str) -> DiffRow {
        DiffRow::removed(
            &CategoryId::new(category),
            category,
            Section::new(id, content).with_summary(format!("{category} (left)")),
            ChapterMetadata::from_sources(
                Some(&Section::new(id, content).with_summary(format!("{category} (left)"))),
                None,
            ),
        )
    }

    fn added(category: &str, id: &str, content: &str) -> DiffRow {
        let section = Section::new(id, content).with_summary(format!("{category} (right)"));
        DiffRow::added(
            &CategoryId::new(category),
            category,
            section.clone(),
            ChapterMetadata::from_sources(None, Some(&section)),
        )
    }

    #[test]
    fn test_choose_strategy() {
        assert_eq!(choose_strategy(0, 10, 2000), OrphanStrategy::Skipped);
        assert_eq!(choose_strategy(10, 0, 2000), OrphanStrategy::Skipped);
        assert_eq!(choose_strategy(10, 10, 2000), OrphanStrategy::Fuzzy);
        assert_eq!(choose_strategy(40, 49, 2000), OrphanStrategy::Fuzzy);
        // The ceiling itself switches to exact matching
        assert_eq!(choose_strategy(40, 50, 2000), OrphanStrategy::Exact);
        assert_eq!(choose_strategy(usize::MAX, 2, 2000), OrphanStrategy::Exact);
    }

    #[test]
    fn test_moved_section_is_merged() {
        let text = "This Constitution takes effect on the day of its promulgation";
        let resolution = resolve_orphans(
            vec![removed("general", "3", text)],
            vec![added("transitory", "201", text)],
            &AlignmentConfig::default(),
        );

        assert_eq!(resolution.strategy, OrphanStrategy::Fuzzy);
        assert_eq!(resolution.merged.len(), 1);
        assert!(resolution.unmatched_left.is_empty());
        assert!(resolution.unmatched_right.is_empty());

        let row = &resolution.merged[0];
        assert_eq!(row.status, DiffStatus::Match);
        assert_eq!(row.category_id, CategoryId::new("transitory"));
        assert_eq!(row.category_title, "transitory");
        assert_eq!(row.key, "transitory::3::201");
        assert_eq!(row.origin_category_id, Some(CategoryId::new("general")));
        assert_eq!(row.metadata.left_ai_summary.as_deref(), Some("general (left)"));
        assert_eq!(row.metadata.right_ai_summary.as_deref(), Some("transitory (right)"));
    }

    #[test]
    fn test_unrelated_orphans_keep_their_rows() {
        let left = removed("general", "3", "Thailand is one and indivisible");
        let right = added("executive", "150", "Ministers must declare their assets annually");
        let resolution = resolve_orphans(vec![left.clone()], vec![right.clone()], &AlignmentConfig::default());

        assert!(resolution.merged.is_empty());
        assert_eq!(resolution.unmatched_left, vec![left]);
        assert_eq!(resolution.unmatched_right, vec![right]);
    }

    #[test]
    fn test_exact_strategy_only_pairs_identical_text() {
        let config = AlignmentConfig {
            complexity_ceiling: 1,
            ..AlignmentConfig::default()
        };
        let resolution = resolve_orphans(
            vec![
                removed("general", "1", "  The state religion clause  "),
                removed("general", "2", "Courts shall be independent"),
            ],
            vec![
                added("judicial", "9", "The courts remain independent"),
                added("monarchy", "4", "The state religion clause"),
            ],
            &config,
        );

        assert_eq!(resolution.strategy, OrphanStrategy::Exact);
        assert_eq!(resolution.merged.len(), 1);
        assert_eq!(resolution.merged[0].key, "monarchy::1::4");
        assert_eq!(resolution.merged[0].status, DiffStatus::Match);
        // The reworded pair would match fuzzily but not exactly
        assert_eq!(resolution.unmatched_left.len(), 1);
        assert_eq!(resolution.unmatched_right.len(), 1);
    }

    #[test]
    fn test_exact_strategy_duplicate_texts_consumed_in_order() {
        let config = AlignmentConfig {
            complexity_ceiling: 1,
            ..AlignmentConfig::default()
        };
        let resolution = resolve_orphans(
            vec![removed("a", "1", "Repealed."), removed("a", "2", "Repealed.")],
            vec![added("b", "10", "Repealed."), added("b", "11", "Repealed.")],
            &config,
        );

        let keys: Vec<&str> = resolution.merged.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b::1::10", "b::2::11"]);
    }

    #[test]
    fn test_greedy_across_orphans() {
        let resolution = resolve_orphans(
            vec![
                removed("a", "1", "The National Assembly consists of two chambers"),
                removed("a", "2", "The Senate consists of appointed members"),
            ],
            vec![added("b", "7", "The National Assembly consists of two chambers")],
            &AlignmentConfig::default(),
        );

        assert_eq!(resolution.merged.len(), 1);
        assert_eq!(resolution.merged[0].section_id, "1");
        assert_eq!(resolution.unmatched_left.len(), 1);
        assert_eq!(resolution.unmatched_left[0].section_id, "2");
    }

    #[test]
    fn test_skipped_when_one_side_empty() {
        let left = removed("a", "1", "text");
        let resolution = resolve_orphans(vec![left], Vec::new(), &AlignmentConfig::default());
        assert_eq!(resolution.strategy, OrphanStrategy::Skipped);
        assert_eq!(resolution.unmatched_left.len(), 1);
    }

    #[test]
    fn test_exact_strategy_respects_candidate_threshold() {
        let text = "This Constitution takes effect on the day of its promulgation";
        for complexity_ceiling in [1, DEFAULT_COMPLEXITY_CEILING] {
            let config = AlignmentConfig {
                candidate_threshold: 1.0,
                match_threshold: 1.0,
                complexity_ceiling,
                ..AlignmentConfig::default()
            };
            assert!(config.validate().is_ok());

            let resolution = resolve_orphans(
                vec![removed("general", "3", text)],
                vec![added("transitory", "201", text)],
                &config,
            );

            // No pair can score above 1.0, in either mode
            assert!(resolution.merged.is_empty(), "ceiling {complexity_ceiling}");
            assert_eq!(resolution.unmatched_left.len(), 1);
            assert_eq!(resolution.unmatched_right.len(), 1);
        }
    }

    #[test]
    fn test_exact_strategy_pairs_empty_texts_like_fuzzy() {
        for complexity_ceiling in [1, DEFAULT_COMPLEXITY_CEILING] {
            let config = AlignmentConfig {
                complexity_ceiling,
                ..AlignmentConfig::default()
            };
            let resolution = resolve_orphans(
                vec![removed("general", "3", "  ")],
                vec![added("transitory", "201", "")],
                &config,
            );

            assert_eq!(resolution.merged.len(), 1, "ceiling {complexity_ceiling}");
            assert_eq!(resolution.merged[0].status, DiffStatus::Match);
        }
    }
}
