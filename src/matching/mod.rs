//! Best-hit selection and reciprocal best-hit matching.
//!
//! This module provides the core selection pipeline:
//!
//! - [`EvalueFilter`]: drops records above the E-value cutoff
//! - [`QueryGroups`]: splits a query-clustered stream into per-query groups
//! - [`rank`]: orders a group best-first
//! - [`select`]: keeps the leading block of tied top-ranked records
//! - [`find_reciprocal`]: pairs forward and reverse best hits
//!
//! ## Ranking
//!
//! Within a group, records are ordered by:
//!
//! 1. **Bit score**, highest first
//! 2. **E-value**, lowest first
//!
//! The sort is stable, so records tied on both keys keep their input order
//! and are reported together as multiple best hits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rbh_finder::matching::best_hit::{extract_best_hits_from_reader, SelectionConfig};
//! use rbh_finder::matching::reciprocal::find_reciprocal;
//! use rbh_finder::parsing::tabular::TabularReader;
//! use std::path::Path;
//!
//! let config = SelectionConfig::default();
//! let mut forward = TabularReader::from_path(Path::new("a_vs_b.tsv")).unwrap();
//! let mut reverse = TabularReader::from_path(Path::new("b_vs_a.tsv")).unwrap();
//!
//! let forward = extract_best_hits_from_reader(&mut forward, &config).unwrap();
//! let reverse = extract_best_hits_from_reader(&mut reverse, &config).unwrap();
//!
//! let matches = find_reciprocal(&forward.hits, &reverse.hits);
//! for pair in &matches.pairs {
//!     println!("{pair}");
//! }
//! ```
//!
//! [`EvalueFilter`]: grouping::EvalueFilter
//! [`QueryGroups`]: grouping::QueryGroups
//! [`rank`]: ranking::rank
//! [`select`]: best_hit::select
//! [`find_reciprocal`]: reciprocal::find_reciprocal

pub mod best_hit;
pub mod grouping;
pub mod ranking;
pub mod reciprocal;
