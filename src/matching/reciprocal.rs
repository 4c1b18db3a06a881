use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::record::AlignmentRecord;
use crate::core::types::ReciprocalPair;

/// Reciprocal pairs found between a forward and a reverse best-hit set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReciprocalMatches<'a> {
    /// One pair per forward record that found a partner, in forward order
    pub pairs: Vec<ReciprocalPair<'a>>,

    /// Number of pairs that repeated the previous pair's forward or reverse query
    pub multi_count: usize,

    /// Each repeated query id, listed once in the order first detected
    pub multi_ids: Vec<String>,
}

/// Index of the reverse set keyed by (query, subject).
///
/// Only the first reverse record for each key is kept, so lookups return the
/// same record a front-to-back scan of the reverse set would find first.
struct ReverseIndex<'a> {
    by_pair: HashMap<(&'a str, &'a str), &'a AlignmentRecord>,
}

impl<'a> ReverseIndex<'a> {
    fn build(reverse: &'a [AlignmentRecord]) -> Self {
        let mut by_pair = HashMap::with_capacity(reverse.len());
        for record in reverse {
            by_pair
                .entry((record.query_id.as_str(), record.subject_id.as_str()))
                .or_insert(record);
        }
        Self { by_pair }
    }

    /// The first reverse record whose query is `query` and subject is `subject`
    fn find(&self, query: &str, subject: &str) -> Option<&'a AlignmentRecord> {
        self.by_pair.get(&(query, subject)).copied()
    }
}

/// Find reciprocal best hits between two best-hit sets.
///
/// A forward record `F` and reverse record `R` pair when `F`'s query is `R`'s
/// subject and `F`'s subject is `R`'s query. Each forward record pairs with at
/// most one reverse record: the first matching one in reverse-set order.
///
/// A pair whose forward query equals the previous pair's forward query, or
/// whose reverse query equals the previous pair's reverse query, is counted
/// as a repeat in `multi_count`, and the repeated id is reported once in
/// `multi_ids`.
#[must_use]
pub fn find_reciprocal<'a>(
    forward: &'a [AlignmentRecord],
    reverse: &'a [AlignmentRecord],
) -> ReciprocalMatches<'a> {
    let index = ReverseIndex::build(reverse);
    let mut matches = ReciprocalMatches::default();
    let mut reported: HashSet<&'a str> = HashSet::new();
    let mut last_forward_query: Option<&'a str> = None;
    let mut last_reverse_query: Option<&'a str> = None;

    for record in forward {
        let Some(partner) = index.find(&record.subject_id, &record.query_id) else {
            continue;
        };
        let pair = ReciprocalPair::new(record, partner);

        let repeated = if last_forward_query == Some(pair.forward_query()) {
            Some(pair.forward_query())
        } else if last_reverse_query == Some(pair.reverse_query()) {
            Some(pair.reverse_query())
        } else {
            None
        };

        if let Some(id) = repeated {
            matches.multi_count += 1;
            if reported.insert(id) {
                debug!(id, "Multiple reciprocal best hits");
                matches.multi_ids.push(id.to_string());
            }
        }

        last_forward_query = Some(pair.forward_query());
        last_reverse_query = Some(pair.reverse_query());
        matches.pairs.push(pair);
    }

    matches
}
