//! # rbh-finder
//!
//! A library for selecting best hits from tabular alignment search output and
//! finding reciprocal best hits (RBH) between two searches.
//!
//! Reciprocal best hits are the usual first-pass ortholog call: run genome A
//! against genome B and B against A, keep each query's best-scoring subject,
//! and report the pairs that pick each other.
//!
//! ## Features
//!
//! - **Best-hit selection**: Ranks each query's hits by bit score, then E-value
//! - **Tie handling**: Reports every subject tied for best, and flags the query
//! - **E-value cutoff**: Drops insignificant hits before ranking
//! - **Reciprocal matching**: Pairs forward and reverse best hits
//! - **Sequence extraction**: Pulls best-hit sequences out of a FASTA file
//!
//! ## Example
//!
//! ```rust,no_run
//! use rbh_finder::{extract_best_hits, find_reciprocal, SelectionConfig, TabularReader};
//! use std::path::Path;
//!
//! let config = SelectionConfig::default();
//!
//! let forward = TabularReader::from_path(Path::new("a_vs_b.tsv"))
//!     .and_then(|mut r| r.read_all())
//!     .unwrap();
//! let reverse = TabularReader::from_path(Path::new("b_vs_a.tsv"))
//!     .and_then(|mut r| r.read_all())
//!     .unwrap();
//!
//! let forward = extract_best_hits(forward, &config);
//! let reverse = extract_best_hits(reverse, &config);
//!
//! let matches = find_reciprocal(&forward.hits, &reverse.hits);
//! println!("{} reciprocal best hits", matches.pairs.len());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Alignment records and result types
//! - [`matching`]: Grouping, ranking, best-hit selection and reciprocal matching
//! - [`parsing`]: Readers for tabular output, id lists and FASTA files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::record::{parse_line, AlignmentRecord, ParsedLine};
pub use crate::core::types::*;
pub use crate::matching::best_hit::{extract_best_hits, select, SelectionConfig};
pub use crate::matching::reciprocal::{find_reciprocal, ReciprocalMatches};
pub use crate::parsing::tabular::TabularReader;
