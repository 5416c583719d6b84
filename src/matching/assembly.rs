use std::collections::HashMap;

use serde::Serialize;

use crate::core::row::{compare_sort_numbers, DiffRow};
use crate::core::types::CategoryId;
use crate::taxonomy::store::CategoryTable;

/// Merge and order the rows of one alignment.
///
/// Rows are grouped by category so each category is contiguous. Canonical
/// categories follow the taxonomy's order; unknown categories come after
/// them in order of first appearance. Within a category rows are stably
/// sorted by numeric section id, so cross-category merges and leftover
/// orphans land at their numeric position in their category.
///
/// Categories are ordered by taxonomy position, not by sorting on title.
#[must_use]
pub fn assemble_rows(rows: Vec<DiffRow>, table: &CategoryTable) -> Vec<DiffRow> {
    let mut groups: Vec<(CategoryId, Vec<DiffRow>)> = Vec::new();
    let mut index: HashMap<CategoryId, usize> = HashMap::new();

    for row in rows {
        let slot = match index.get(&row.category_id) {
            Some(&slot) => slot,
            None => {
                index.insert(row.category_id.clone(), groups.len());
                groups.push((row.category_id.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.push(row);
    }

    // Stable: unknown categories keep first-appearance order among themselves
    groups.sort_by_key(|(id, _)| table.position(id).unwrap_or(usize::MAX));

    groups
        .into_iter()
        .flat_map(|(_, mut group)| {
            group.sort_by(|a, b| compare_sort_numbers(a.sort_number(), b.sort_number()));
            group
        })
        .collect()
}

/// A contiguous run of rows sharing one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub id: &'a CategoryId,
    pub title: &'a str,
    pub rows: &'a [DiffRow],
}

/// Split ordered rows into their category runs, for sectioned display
#[must_use]
pub fn group_by_category(rows: &[DiffRow]) -> Vec<CategoryGroup<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;

    while start < rows.len() {
        let id = &rows[start].category_id;
        let len = rows[start..]
            .iter()
            .take_while(|row| &row.category_id == id)
            .count();
        groups.push(CategoryGroup {
            id,
            title: &rows[start].category_title,
            rows: &rows[start..start + len],
        });
        start += len;
    }

    groups
}
