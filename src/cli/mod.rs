//! Command-line interface for rbh-finder.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **best-hits**: Select the best hit(s) per query from tabular search output
//! - **reciprocal**: Find reciprocal best hits between two best-hit files
//! - **extract**: Pull sequences out of a FASTA file by id
//!
//! ## Usage
//!
//! ```text
//! # Best hits of A against B, with the subject ids for sequence extraction
//! rbh-finder best-hits a_vs_b.tsv -o a_vs_b.best.tsv --ids a_vs_b.ids
//!
//! # Same for the reverse search, with a looser cutoff
//! rbh-finder best-hits b_vs_a.tsv -o b_vs_a.best.tsv -e 1e-5
//!
//! # Reciprocal best hits
//! rbh-finder reciprocal a_vs_b.best.tsv b_vs_a.best.tsv -o rbh.tsv
//!
//! # Sequences of the best-hit subjects
//! rbh-finder extract b.fasta --ids a_vs_b.ids -o a_vs_b.best.fasta
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

pub mod best_hits;
pub mod extract;
pub mod reciprocal;

#[derive(Parser)]
#[command(name = "rbh-finder")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Select best hits from tabular alignment output and find reciprocal best hits")]
#[command(
    long_about = "rbh-finder works on 12-column tabular search output (BLAST -outfmt 6 and compatible tools).\n\nIt provides:\n- Best-hit selection per query by bit score, then E-value, keeping ties\n- Reciprocal best-hit detection between a forward and a reverse search\n- Extraction of best-hit sequences from a FASTA file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Format of the summary printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select the best hit(s) for each query
    BestHits(best_hits::BestHitsArgs),

    /// Find reciprocal best hits between a forward and a reverse best-hit file
    Reciprocal(reciprocal::ReciprocalArgs),

    /// Extract FASTA records by id
    Extract(extract::ExtractArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Create an output file for buffered writing.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be created.
pub(crate) fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}
