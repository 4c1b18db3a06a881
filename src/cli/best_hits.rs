use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{create_output, OutputFormat};
use crate::core::types::{BestHitSet, BestHitSummary};
use crate::matching::best_hit::{extract_best_hits_from_reader, SelectionConfig};
use crate::parsing::tabular::TabularReader;
use crate::utils::validation::{check_input_readable, parse_evalue_cutoff};

#[derive(Args)]
pub struct BestHitsArgs {
    /// Tabular search output (12 columns, tab-separated; may be gzipped).
    /// Hits for each query must be contiguous, as search tools write them.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file for the best-hit lines
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Discard hits with an E-value above this cutoff
    #[arg(short, long, default_value = "1e-10", value_parser = parse_evalue_cutoff)]
    pub evalue: f64,

    /// Also write the subject id of every best hit, one per line, to this file
    #[arg(long)]
    pub ids: Option<PathBuf>,
}

/// Execute best-hits subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or an output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: BestHitsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_input_readable(&args.input)?;

    let config = SelectionConfig {
        evalue_cutoff: args.evalue,
    };

    if verbose {
        eprintln!(
            "Selecting best hits from {} (E-value cutoff {:e})",
            args.input.display(),
            config.evalue_cutoff
        );
    }

    let mut reader = TabularReader::from_path(&args.input)
        .with_context(|| format!("Cannot open {}", args.input.display()))?;
    let best_hits = extract_best_hits_from_reader(&mut reader, &config)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    write_best_hits(&args, &best_hits)?;

    let summary = BestHitSummary {
        lines_read: reader.lines_read(),
        malformed_lines: reader.malformed_lines(),
        records_above_cutoff: best_hits.records_above_cutoff,
        best_hits: best_hits.hits.len(),
        multi_hit_queries: best_hits.multi_hit_count(),
        multi_hit_query_ids: best_hits.multi_hit_queries.clone(),
    };

    info!(
        lines = summary.lines_read,
        best_hits = summary.best_hits,
        queries = best_hits.query_groups,
        "Best-hit selection finished"
    );

    match format {
        OutputFormat::Text => print_text_summary(&args, &summary),
        OutputFormat::Json => print_json_summary(&args, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn write_best_hits(args: &BestHitsArgs, best_hits: &BestHitSet) -> anyhow::Result<()> {
    // Both files are created up front so a bad --ids path leaves no best-hit output
    let mut out = create_output(&args.output)?;
    let mut ids_out = match &args.ids {
        Some(path) => match create_output(path) {
            Ok(writer) => Some((path, writer)),
            Err(e) => {
                drop(out);
                let _ = std::fs::remove_file(&args.output);
                return Err(e);
            }
        },
        None => None,
    };

    for hit in &best_hits.hits {
        writeln!(out, "{hit}")
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some((path, out)) = ids_out.as_mut() {
        for id in best_hits.subject_ids() {
            writeln!(out, "{id}").with_context(|| format!("Failed to write {}", path.display()))?;
        }
        out.flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

fn print_text_summary(args: &BestHitsArgs, summary: &BestHitSummary) {
    println!("Best-Hit Selection");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", args.input.display());
    println!("  Lines read: {}", summary.lines_read);
    println!("  Malformed lines skipped: {}", summary.malformed_lines);
    println!(
        "  Hits above E-value cutoff ({:e}): {}",
        args.evalue, summary.records_above_cutoff
    );

    println!("\nOutput: {}", args.output.display());
    println!("  Best hits written: {}", summary.best_hits);
    println!(
        "  Queries with multiple best hits: {}",
        summary.multi_hit_queries
    );
    for id in &summary.multi_hit_query_ids {
        println!("    {id}");
    }
}

fn print_json_summary(args: &BestHitsArgs, summary: &BestHitSummary) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "output": args.output.display().to_string(),
        "ids_output": args.ids.as_ref().map(|p| p.display().to_string()),
        "evalue_cutoff": args.evalue,
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &BestHitSummary) {
    println!(
        "lines_read\tmalformed_lines\trecords_above_cutoff\tbest_hits\tmulti_hit_queries\tmulti_hit_query_ids"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        summary.lines_read,
        summary.malformed_lines,
        summary.records_above_cutoff,
        summary.best_hits,
        summary.multi_hit_queries,
        summary.multi_hit_query_ids.join(","),
    );
}
