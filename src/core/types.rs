use std::fmt;

use serde::Serialize;

use crate::core::record::AlignmentRecord;

/// Best hits retained across all queries of one extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestHitSet {
    /// Accepted records, in selection order grouped by query
    pub hits: Vec<AlignmentRecord>,

    /// Query ids whose group had more than one tied best hit.
    ///
    /// A query id that appears in two non-contiguous groups is listed once
    /// per group that had ties.
    pub multi_hit_queries: Vec<String>,

    /// Number of query groups seen after E-value filtering
    pub query_groups: usize,

    /// Records dropped by the E-value cutoff before grouping
    pub records_above_cutoff: usize,
}

impl BestHitSet {
    /// Number of query groups with more than one best hit
    #[must_use]
    pub fn multi_hit_count(&self) -> usize {
        self.multi_hit_queries.len()
    }

    /// Subject ids of the accepted records, in output order
    pub fn subject_ids(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|hit| hit.subject_id.as_str())
    }
}

/// A forward record and the reverse record that names it back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalPair<'a> {
    pub forward: &'a AlignmentRecord,
    pub reverse: &'a AlignmentRecord,
}

impl<'a> ReciprocalPair<'a> {
    #[must_use]
    pub fn new(forward: &'a AlignmentRecord, reverse: &'a AlignmentRecord) -> Self {
        Self { forward, reverse }
    }

    #[must_use]
    pub fn forward_query(&self) -> &'a str {
        &self.forward.query_id
    }

    /// The forward subject, which is also the reverse query
    #[must_use]
    pub fn forward_subject(&self) -> &'a str {
        &self.forward.subject_id
    }

    #[must_use]
    pub fn reverse_query(&self) -> &'a str {
        &self.reverse.query_id
    }
}

/// Six tab-separated fields: forward query, forward subject, forward E-value,
/// forward bit score, reverse E-value, reverse bit score.
impl fmt::Display for ReciprocalPair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (forward_evalue, forward_score) = self.forward.score_columns();
        let (reverse_evalue, reverse_score) = self.reverse.score_columns();
        write!(
            f,
            "{}\t{}\t{forward_evalue}\t{forward_score}\t{reverse_evalue}\t{reverse_score}",
            self.forward_query(),
            self.forward_subject(),
        )
    }
}

/// Counts reported at the end of a best-hit extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BestHitSummary {
    /// Every line read, including blank and malformed ones
    pub lines_read: usize,
    /// Lines skipped because they did not have 12 fields
    pub malformed_lines: usize,
    /// Records dropped by the E-value cutoff
    pub records_above_cutoff: usize,
    /// Best-hit records written
    pub best_hits: usize,
    /// Query groups with more than one tied best hit
    pub multi_hit_queries: usize,
    pub multi_hit_query_ids: Vec<String>,
}

/// Counts reported at the end of a reciprocal-best-hit run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReciprocalSummary {
    pub forward_lines_read: usize,
    pub reverse_lines_read: usize,
    pub forward_records: usize,
    pub reverse_records: usize,
    pub reciprocal_pairs: usize,
    pub multi_rbh_count: usize,
    pub multi_rbh_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::tests::record;

    #[test]
    fn test_reciprocal_pair_display_keeps_source_text() {
        let forward = record("query_001", "id03", "2e-37", "154");
        let reverse = record("id03", "query_001", "2e-34", "153");
        let pair = ReciprocalPair::new(&forward, &reverse);

        assert_eq!(pair.to_string(), "query_001\tid03\t2e-37\t154\t2e-34\t153");
        assert_eq!(pair.forward_subject(), pair.reverse_query());
    }

    #[test]
    fn test_best_hit_set_subject_ids() {
        let set = BestHitSet {
            hits: vec![
                record("q1", "s1", "1e-50", "200"),
                record("q2", "s7", "1e-40", "180"),
            ],
            ..BestHitSet::default()
        };

        assert_eq!(set.subject_ids().collect::<Vec<_>>(), vec!["s1", "s7"]);
        assert_eq!(set.hits.len(), 2);
        assert_eq!(set.multi_hit_count(), 0);
    }
}
