use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod pipeline;
mod report;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("fasta_reconcile=debug,info")
    } else {
        EnvFilter::new("fasta_reconcile=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Merge(args) => {
            cli::merge::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
