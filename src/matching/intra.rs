use crate::core::row::{compare_sort_numbers, ChapterMetadata, DiffRow};
use crate::core::section::Section;
use crate::matching::engine::AlignmentConfig;
use crate::matching::resolver::ResolvedCategory;
use crate::matching::scoring::similarity;

/// A scored edge between a left and a right index
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub left: usize,
    pub right: usize,
    pub score: f64,
}

/// Greedy assignment over candidate edges.
///
/// Edges are taken by descending score; an edge is accepted only if neither
/// endpoint is used yet. The sort is stable, so equal scores keep their
/// generation order (left-major), which keeps the result deterministic.
pub(crate) fn greedy_assign(
    mut candidates: Vec<Candidate>,
    left_len: usize,
    right_len: usize,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut used_left = vec![false; left_len];
    let mut used_right = vec![false; right_len];
    let mut accepted = Vec::new();

    for candidate in candidates {
        if used_left[candidate.left] || used_right[candidate.right] {
            continue;
        }
        used_left[candidate.left] = true;
        used_right[candidate.right] = true;
        accepted.push(candidate);
    }

    accepted
}

/// Every left/right pair whose similarity exceeds the candidate threshold
pub(crate) fn candidate_edges<L, R>(left: &[L], right: &[R], threshold: f64) -> Vec<Candidate>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut candidates = Vec::new();
    for (l, left_text) in left.iter().enumerate() {
        for (r, right_text) in right.iter().enumerate() {
            let score = similarity(left_text.as_ref(), right_text.as_ref());
            if score > threshold {
                candidates.push(Candidate {
                    left: l,
                    right: r,
                    score,
                });
            }
        }
    }
    candidates
}

/// Align the sections of one resolved category.
///
/// Every section of both pools lands in exactly one row: a MATCH/MODIFIED
/// pair, a REMOVE (left only) or an ADD (right only). Rows come back ordered
/// by numeric section id.
#[must_use]
pub fn match_within_category(
    category: &ResolvedCategory,
    left: &[&Section],
    right: &[&Section],
    config: &AlignmentConfig,
) -> Vec<DiffRow> {
    let metadata = ChapterMetadata::from_sources(left.first().copied(), right.first().copied());

    let left_texts: Vec<&str> = left.iter().map(|s| s.content.as_str()).collect();
    let right_texts: Vec<&str> = right.iter().map(|s| s.content.as_str()).collect();
    let candidates = candidate_edges(&left_texts, &right_texts, config.candidate_threshold);
    let candidate_count = candidates.len();
    let accepted = greedy_assign(candidates, left.len(), right.len());

    tracing::debug!(
        category = %category.id,
        left = left.len(),
        right = right.len(),
        candidates = candidate_count,
        paired = accepted.len(),
        "matched category"
    );

    let mut used_left = vec![false; left.len()];
    let mut used_right = vec![false; right.len()];
    let mut rows = Vec::with_capacity(left.len() + right.len() - accepted.len());

    for candidate in &accepted {
        used_left[candidate.left] = true;
        used_right[candidate.right] = true;
        rows.push(DiffRow::paired(
            &category.id,
            &category.title,
            left[candidate.left].clone(),
            right[candidate.right].clone(),
            candidate.score,
            config.match_threshold,
            metadata.clone(),
        ));
    }

    for (section, _) in left.iter().zip(&used_left).filter(|(_, used)| !**used) {
        rows.push(DiffRow::removed(
            &category.id,
            &category.title,
            (*section).clone(),
            metadata.clone(),
        ));
    }

    for (section, _) in right.iter().zip(&used_right).filter(|(_, used)| !**used) {
        rows.push(DiffRow::added(
            &category.id,
            &category.title,
            (*section).clone(),
            metadata.clone(),
        ));
    }

    rows.sort_by(|a, b| compare_sort_numbers(a.sort_number(), b.sort_number()));
    rows
}
