// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table reconstructor — visual rows from word bounding boxes.
//
// Rows are recovered purely geometrically: words whose y-coordinates round
// to the same multiple of the cluster tolerance form one row. The result is
// a visual approximation, not a relational table.

use std::collections::BTreeMap;

use satzwerk_core::{RowClusterConfig, TableGrid, Word};
use tracing::debug;

/// Reconstruct the row/column structure of one page from its words.
///
/// Algorithm:
/// 1. each word gets the cluster key `round(y / t) * t`, quantizing baseline
///    jitter within one printed row into the same bucket;
/// 2. buckets are ordered by key descending — y grows upward, so descending
///    keys read top-to-bottom;
/// 3. within a bucket, words are stable-sorted by `x` ascending, so ties
///    keep input order.
///
/// Zero words yield an empty grid. Words straddling a bucket boundary under
/// rounding may split into adjacent rows; that is an accepted limitation of
/// the heuristic and is not corrected.
pub fn reconstruct_rows(words: &[Word], config: &RowClusterConfig) -> TableGrid {
    if words.is_empty() {
        return TableGrid::default();
    }

    // Tolerance must be positive for the key quantization to terminate in a
    // finite set of buckets.
    let tolerance = config.row_tolerance.max(f32::MIN_POSITIVE);

    // Integer bucket index rather than the f32 key itself, so grouping and
    // ordering never depend on float equality.
    let mut buckets: BTreeMap<i64, Vec<&Word>> = BTreeMap::new();
    for word in words {
        let bucket = (word.y / tolerance).round() as i64;
        buckets.entry(bucket).or_default().push(word);
    }

    let rows: Vec<Vec<String>> = buckets
        .into_iter()
        .rev()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            row.iter().map(|word| word.text.clone()).collect()
        })
        .collect();

    debug!(
        word_count = words.len(),
        row_count = rows.len(),
        "Table rows reconstructed"
    );
    TableGrid { rows }
}
