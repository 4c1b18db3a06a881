use std::cmp::Ordering;

use crate::core::record::AlignmentRecord;
use crate::matching::grouping::HitGroup;

/// Compare two records by rank: higher bit score first, then lower E-value.
///
/// Records equal on both keys compare `Equal`; this is a preorder, not an
/// identity check.
#[must_use]
pub fn compare_rank(a: &AlignmentRecord, b: &AlignmentRecord) -> Ordering {
    b.bit_score
        .partial_cmp(&a.bit_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.expect_value
                .partial_cmp(&b.expect_value)
                .unwrap_or(Ordering::Equal)
        })
}

/// Order a group's records best-first.
///
/// The sort is stable, so tied records keep their input order.
#[must_use]
pub fn rank(group: HitGroup) -> Vec<AlignmentRecord> {
    let mut records = group.records;
    records.sort_by(compare_rank);
    records
}
