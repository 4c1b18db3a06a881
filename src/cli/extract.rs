//! Extract command - pull sequences out of a FASTA file by id.
//!
//! Typically fed the `--ids` file written by `best-hits`, to collect the
//! subject sequences of the best hits.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{create_output, OutputFormat};
use crate::parsing::fasta::{extract_from_path, ExtractSummary, DEFAULT_LINE_WIDTH};
use crate::parsing::ids::read_id_file;
use crate::utils::validation::check_input_readable;

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    /// FASTA file to extract from (may be gzipped)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// File of sequence ids, one per line
    #[arg(long, required = true)]
    pub ids: PathBuf,

    /// Output FASTA file
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Bases per sequence line in the output
    #[arg(
        long,
        default_value_t = DEFAULT_LINE_WIDTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub line_width: usize,
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or the output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_input_readable(&args.fasta)?;
    check_input_readable(&args.ids)?;

    let ids = read_id_file(&args.ids)
        .with_context(|| format!("Failed to read ids from {}", args.ids.display()))?;

    if verbose {
        eprintln!("Extracting {} ids from {}", ids.len(), args.fasta.display());
    }

    let mut out = create_output(&args.output)?;
    let summary = extract_from_path(&args.fasta, &ids, &mut out, args.line_width)
        .with_context(|| format!("Failed to extract from {}", args.fasta.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if !summary.missing_ids.is_empty() {
        warn!(
            missing = summary.missing_ids.len(),
            "Some ids were not found in the FASTA file"
        );
    }
    info!(
        scanned = summary.records_scanned,
        written = summary.records_written,
        "Sequence extraction finished"
    );

    match format {
        OutputFormat::Text => print_text_summary(&args, ids.len(), &summary),
        OutputFormat::Json => print_json_summary(&args, ids.len(), &summary)?,
        OutputFormat::Tsv => print_tsv_summary(ids.len(), &summary),
    }

    Ok(())
}

fn print_text_summary(args: &ExtractArgs, requested: usize, summary: &ExtractSummary) {
    println!("Sequence Extraction");
    println!("{}", "=".repeat(60));

    println!("\nFASTA: {}", args.fasta.display());
    println!("  Records scanned: {}", summary.records_scanned);
    println!("  Ids requested: {requested}");

    println!("\nOutput: {}", args.output.display());
    println!("  Records written: {}", summary.records_written);
    println!("  Ids not found: {}", summary.missing_ids.len());
    for id in &summary.missing_ids {
        println!("    {id}");
    }
}

fn print_json_summary(
    args: &ExtractArgs,
    requested: usize,
    summary: &ExtractSummary,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "fasta": args.fasta.display().to_string(),
        "ids": args.ids.display().to_string(),
        "output": args.output.display().to_string(),
        "ids_requested": requested,
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(requested: usize, summary: &ExtractSummary) {
    println!("records_scanned\tids_requested\trecords_written\tmissing_ids");
    println!(
        "{}\t{requested}\t{}\t{}",
        summary.records_scanned,
        summary.records_written,
        summary.missing_ids.join(","),
    );
}
