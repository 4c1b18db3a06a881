use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{create_output, OutputFormat};
use crate::core::record::AlignmentRecord;
use crate::core::types::ReciprocalSummary;
use crate::matching::reciprocal::{find_reciprocal, ReciprocalMatches};
use crate::parsing::tabular::TabularReader;
use crate::utils::validation::check_input_readable;

#[derive(Args)]
pub struct ReciprocalArgs {
    /// Best hits of the forward search (A against B)
    #[arg(required = true)]
    pub forward: PathBuf,

    /// Best hits of the reverse search (B against A)
    #[arg(required = true)]
    pub reverse: PathBuf,

    /// Output file for reciprocal pairs
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

/// A best-hit file read fully into memory
struct LoadedHits {
    records: Vec<AlignmentRecord>,
    lines_read: usize,
}

/// Execute reciprocal subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or the output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReciprocalArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_input_readable(&args.forward)?;
    check_input_readable(&args.reverse)?;

    let forward = load_hits(&args.forward)?;
    let reverse = load_hits(&args.reverse)?;

    if verbose {
        eprintln!(
            "Forward: {} best hits, reverse: {} best hits",
            forward.records.len(),
            reverse.records.len()
        );
    }

    let matches = find_reciprocal(&forward.records, &reverse.records);
    write_pairs(&args.output, &matches)?;

    let summary = ReciprocalSummary {
        forward_lines_read: forward.lines_read,
        reverse_lines_read: reverse.lines_read,
        forward_records: forward.records.len(),
        reverse_records: reverse.records.len(),
        reciprocal_pairs: matches.pairs.len(),
        multi_rbh_count: matches.multi_count,
        multi_rbh_ids: matches.multi_ids.clone(),
    };

    info!(
        pairs = summary.reciprocal_pairs,
        repeats = summary.multi_rbh_count,
        "Reciprocal matching finished"
    );

    match format {
        OutputFormat::Text => print_text_summary(&args, &summary),
        OutputFormat::Json => print_json_summary(&args, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn load_hits(path: &Path) -> anyhow::Result<LoadedHits> {
    let mut reader = TabularReader::from_path(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    let records = reader
        .read_all()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(LoadedHits {
        records,
        lines_read: reader.lines_read(),
    })
}

fn write_pairs(path: &Path, matches: &ReciprocalMatches<'_>) -> anyhow::Result<()> {
    let mut out = create_output(path)?;
    for pair in &matches.pairs {
        writeln!(out, "{pair}").with_context(|| format!("Failed to write {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn print_text_summary(args: &ReciprocalArgs, summary: &ReciprocalSummary) {
    println!("Reciprocal Best Hits");
    println!("{}", "=".repeat(60));

    println!("\nForward: {}", args.forward.display());
    println!("  Lines read: {}", summary.forward_lines_read);
    println!("  Best hits: {}", summary.forward_records);

    println!("\nReverse: {}", args.reverse.display());
    println!("  Lines read: {}", summary.reverse_lines_read);
    println!("  Best hits: {}", summary.reverse_records);

    println!("\nOutput: {}", args.output.display());
    println!("  Reciprocal pairs: {}", summary.reciprocal_pairs);
    println!("  Multiple reciprocal hits: {}", summary.multi_rbh_count);
    for id in &summary.multi_rbh_ids {
        println!("    {id}");
    }
}

fn print_json_summary(args: &ReciprocalArgs, summary: &ReciprocalSummary) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "forward": args.forward.display().to_string(),
        "reverse": args.reverse.display().to_string(),
        "output": args.output.display().to_string(),
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &ReciprocalSummary) {
    println!(
        "forward_lines_read\treverse_lines_read\tforward_records\treverse_records\treciprocal_pairs\tmulti_rbh_count\tmulti_rbh_ids"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        summary.forward_lines_read,
        summary.reverse_lines_read,
        summary.forward_records,
        summary.reverse_records,
        summary.reciprocal_pairs,
        summary.multi_rbh_count,
        summary.multi_rbh_ids.join(","),
    );
}
