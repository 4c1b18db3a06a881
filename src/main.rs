use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rbh_finder=debug,info")
    } else {
        EnvFilter::new("rbh_finder=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::BestHits(args) => {
            cli::best_hits::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Reciprocal(args) => {
            cli::reciprocal::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Extract(args) => {
            cli::extract::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
