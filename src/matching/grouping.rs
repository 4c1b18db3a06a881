use std::iter::Peekable;

use tracing::trace;

use crate::core::record::AlignmentRecord;

/// Default E-value cutoff: records with a larger E-value are discarded
pub const DEFAULT_EVALUE_CUTOFF: f64 = 1e-10;

/// Records sharing one query id, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct HitGroup {
    pub query_id: String,
    pub records: Vec<AlignmentRecord>,
}

/// Lazily splits a query-clustered record stream into [`HitGroup`]s.
///
/// A new group starts wherever the query id differs from the previous
/// record's. Input is not sorted: if a query id reappears after a different
/// id, the later run is a separate group with its own best-hit selection.
pub struct QueryGroups<I: Iterator<Item = AlignmentRecord>> {
    records: Peekable<I>,
}

impl<I: Iterator<Item = AlignmentRecord>> QueryGroups<I> {
    pub fn new(records: I) -> Self {
        Self {
            records: records.peekable(),
        }
    }
}

impl<I: Iterator<Item = AlignmentRecord>> Iterator for QueryGroups<I> {
    type Item = HitGroup;

    fn next(&mut self) -> Option<HitGroup> {
        let first = self.records.next()?;
        let query_id = first.query_id.clone();
        let mut records = vec![first];

        while let Some(record) = self.records.next_if(|r| r.query_id == query_id) {
            records.push(record);
        }

        trace!(query = %query_id, records = records.len(), "Built hit group");
        Some(HitGroup { query_id, records })
    }
}

/// Drops records whose E-value is above the cutoff.
///
/// Keeps a count of dropped records so the caller can report it.
pub struct EvalueFilter<I> {
    records: I,
    cutoff: f64,
    rejected: usize,
}

impl<I: Iterator<Item = AlignmentRecord>> EvalueFilter<I> {
    pub fn new(records: I, cutoff: f64) -> Self {
        Self {
            records,
            cutoff,
            rejected: 0,
        }
    }

    /// Number of records dropped so far
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl<I: Iterator<Item = AlignmentRecord>> Iterator for EvalueFilter<I> {
    type Item = AlignmentRecord;

    fn next(&mut self) -> Option<AlignmentRecord> {
        loop {
            let record = self.records.next()?;
            if record.expect_value <= self.cutoff {
                return Some(record);
            }
            self.rejected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    fn group_ids(records: Vec<AlignmentRecord>) -> Vec<(String, usize)> {
        QueryGroups::new(records.into_iter())
            .map(|g| (g.query_id.clone(), g.records.len()))
            .collect()
    }

    #[test]
    fn test_contiguous_groups() {
        let records = vec![
            record("q1", "a", "1e-20", "100"),
            record("q1", "b", "1e-20", "90"),
            record("q2", "c", "1e-20", "80"),
            record("q3", "d", "1e-20", "70"),
            record("q3", "e", "1e-20", "60"),
        ];

        assert_eq!(
            group_ids(records),
            vec![
                ("q1".to_string(), 2),
                ("q2".to_string(), 1),
                ("q3".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_non_contiguous_repeat_is_a_new_group() {
        let records = vec![
            record("q1", "a", "1e-20", "100"),
            record("q2", "b", "1e-20", "90"),
            record("q1", "c", "1e-20", "80"),
        ];

        assert_eq!(
            group_ids(records),
            vec![
                ("q1".to_string(), 1),
                ("q2".to_string(), 1),
                ("q1".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(group_ids(Vec::new()).is_empty());
    }

    #[test]
    fn test_evalue_filter_is_strict_and_counts() {
        let records = vec![
            record("q1", "a", "1e-10", "100"),
            record("q1", "b", "2e-10", "150"),
            record("q1", "c", "0", "90"),
        ];

        let mut filter = EvalueFilter::new(records.into_iter(), DEFAULT_EVALUE_CUTOFF);
        let kept: Vec<_> = filter.by_ref().map(|r| r.subject_id).collect();

        assert_eq!(kept, vec!["a", "c"]);
        assert_eq!(filter.rejected(), 1);
    }

    #[test]
    fn test_filter_runs_before_grouping() {
        // The q2 record is filtered out, so the two q1 runs become contiguous
        let records = vec![
            record("q1", "a", "1e-20", "100"),
            record("q2", "b", "1e-3", "90"),
            record("q1", "c", "1e-20", "80"),
        ];

        let groups: Vec<_> =
            QueryGroups::new(EvalueFilter::new(records.into_iter(), 1e-10)).collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records.len(), 2);
    }
}
