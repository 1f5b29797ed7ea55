//! Nested-set ordering of sibling taxons.
//!
//! Spree stores taxonomies as nested sets: every taxon owns a `[left, right]`
//! interval and siblings occupy disjoint intervals in display order. Sorting
//! siblings therefore only needs interval comparison, never names or ids.

use std::cmp::Ordering;

use crate::document::Taxon;

/// Three-way comparison of two sibling taxons by their intervals.
///
/// `a` sorts first when its interval ends before `b` starts, last when `b`
/// ends before `a` starts. Overlapping or nested intervals compare `Equal`.
#[must_use]
pub fn compare_taxons(a: &Taxon, b: &Taxon) -> Ordering {
    compare_intervals(
        (a.attributes.left, a.attributes.right),
        (b.attributes.left, b.attributes.right),
    )
}

fn compare_intervals((left1, right1): (i64, i64), (left2, right2): (i64, i64)) -> Ordering {
    if right1 < left2 {
        Ordering::Less
    } else if right2 < left1 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Sorts sibling taxons into display order.
///
/// The sort is stable, so taxons whose intervals overlap keep the order the
/// API returned them in. Each overlapping neighbour pair is logged.
pub fn sort_taxons(taxons: &mut [Taxon]) {
    // Insertion sort: with overlapping intervals the comparator is not a
    // total order, and `slice::sort_by` may panic on such input.
    for i in 1..taxons.len() {
        let mut j = i;
        while j > 0 && compare_taxons(&taxons[j - 1], &taxons[j]) == Ordering::Greater {
            taxons.swap(j - 1, j);
            j -= 1;
        }
    }

    for pair in taxons.windows(2) {
        if compare_taxons(&pair[0], &pair[1]) == Ordering::Equal {
            tracing::warn!(
                first_id = %pair[0].id,
                first_left = pair[0].attributes.left,
                first_right = pair[0].attributes.right,
                second_id = %pair[1].id,
                second_left = pair[1].attributes.left,
                second_right = pair[1].attributes.right,
                "sibling taxons have overlapping nested-set intervals; keeping API order"
            );
        }
    }
}
