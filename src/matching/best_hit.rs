use std::io::BufRead;

use tracing::debug;

use crate::core::record::AlignmentRecord;
use crate::core::types::BestHitSet;
use crate::matching::grouping::{EvalueFilter, QueryGroups, DEFAULT_EVALUE_CUTOFF};
use crate::matching::ranking::rank;
use crate::parsing::tabular::TabularReader;
use crate::parsing::ParseError;

/// Configuration for best-hit selection
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Records with an E-value above this are dropped before grouping
    pub evalue_cutoff: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            evalue_cutoff: DEFAULT_EVALUE_CUTOFF,
        }
    }
}

/// The best hits chosen from one ranked group
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub hits: Vec<AlignmentRecord>,
    /// More than one record tied for best
    pub has_multiple: bool,
}

/// Take the leading block of top-ranked records from a ranked group.
///
/// The first record is always accepted. Each following record is accepted
/// only if its bit score is no lower and its E-value no higher than the
/// previously accepted record; the scan stops at the first record that fails,
/// and nothing after it is considered.
#[must_use]
pub fn select(ranked: Vec<AlignmentRecord>) -> Selection {
    let mut hits = Vec::new();
    let mut last: Option<(f64, f64)> = None;

    for record in ranked {
        if let Some((bit_score, expect_value)) = last {
            if record.bit_score < bit_score || record.expect_value > expect_value {
                break;
            }
        }
        last = Some((record.bit_score, record.expect_value));
        hits.push(record);
    }

    let has_multiple = hits.len() > 1;
    Selection { hits, has_multiple }
}

/// Run the full selection pipeline: filter, group, rank and select.
///
/// Records must be clustered by query id, as search tools emit them.
#[must_use]
pub fn extract_best_hits<I>(records: I, config: &SelectionConfig) -> BestHitSet
where
    I: IntoIterator<Item = AlignmentRecord>,
{
    let mut filter = EvalueFilter::new(records.into_iter(), config.evalue_cutoff);

    let mut set = QueryGroups::new(filter.by_ref()).fold(BestHitSet::default(), |mut set, group| {
        let query_id = group.query_id.clone();
        let selection = select(rank(group));

        if selection.has_multiple {
            debug!(
                query = %query_id,
                hits = selection.hits.len(),
                "Query has multiple best hits"
            );
            set.multi_hit_queries.push(query_id);
        }

        set.query_groups += 1;
        set.hits.extend(selection.hits);
        set
    });

    set.records_above_cutoff = filter.rejected();
    set
}

/// Run [`extract_best_hits`] over a tabular reader, stopping at the first
/// parse error.
///
/// # Errors
///
/// Returns the first `ParseError` raised by the reader.
pub fn extract_best_hits_from_reader<R: BufRead>(
    reader: &mut TabularReader<R>,
    config: &SelectionConfig,
) -> Result<BestHitSet, ParseError> {
    let mut error = None;
    let records = reader.records().map_while(|result| match result {
        Ok(record) => Some(record),
        Err(e) => {
            error = Some(e);
            None
        }
    });

    let set = extract_best_hits(records, config);

    match error {
        Some(e) => Err(e),
        None => Ok(set),
    }
}
