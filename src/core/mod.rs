//! Core data types for best-hit selection.
//!
//! - [`AlignmentRecord`]: one line of 12-column tabular alignment output
//! - [`BestHitSet`]: the best hits retained across all queries of a run
//! - [`ReciprocalPair`]: a forward/reverse record pair that name each other
//!
//! ## Input Columns
//!
//! | # | Column | Used for |
//! |---|--------|----------|
//! | 1 | qseqid | grouping, reciprocal matching |
//! | 2 | sseqid | reciprocal matching, id output |
//! | 3-10 | pident .. send | informational |
//! | 11 | evalue | cutoff, tie-break |
//! | 12 | bitscore | ranking |
//!
//! [`AlignmentRecord`]: record::AlignmentRecord
//! [`BestHitSet`]: types::BestHitSet
//! [`ReciprocalPair`]: types::ReciprocalPair

pub mod record;
pub mod types;
