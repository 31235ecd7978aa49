//! Inspect command - run the per-file pipeline on a single dump and report
//! the record kept for each organism.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{FilterArgs, OutputFormat};
use crate::core::record::SequenceEntry;
use crate::pipeline::{process_file, FileInput};
use crate::utils::validation::check_input_file;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// FASTA dump (plain or gzipped)
    #[arg(long, required = true)]
    pub input: PathBuf,

    /// Hit table for the dump (CSV: ignored, accession, percent identity)
    #[arg(long)]
    pub scores: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the inspect command
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the input cannot be
/// processed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.filter.build_config()?;
    let canonicalizer = args.filter.canonicalizer()?;

    check_input_file(&args.input)?;
    let mut input = FileInput::new("input", &args.input);
    if let Some(scores) = &args.scores {
        check_input_file(scores)?;
        input = input.with_scores(scores);
    }

    let result = process_file(input, &config, &canonicalizer)?;

    if verbose {
        eprintln!(
            "{}: {} records, {} skipped, {} replaced",
            args.input.display(),
            result.stats.records,
            result.stats.skipped(),
            result.stats.replaced,
        );
    }

    let mut entries: Vec<&SequenceEntry> = result.entries.values().collect();
    entries.sort_by(|a, b| a.canonical_name.cmp(&b.canonical_name));

    match format {
        OutputFormat::Text => print_text_entries(&entries),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": args.input.display().to_string(),
                "stats": result.stats,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv_entries(&entries),
    }

    Ok(())
}

fn print_text_entries(entries: &[&SequenceEntry]) {
    println!("Organisms: {}", entries.len());
    println!("{}", "=".repeat(60));

    for entry in entries {
        let name = if entry.canonical_name.is_empty() {
            "(no annotation)"
        } else {
            entry.canonical_name.as_str()
        };
        println!("\n{name}");
        println!("  Accession: {}", entry.accession.as_deref().unwrap_or("-"));
        println!("  Organism: {}", entry.organism_or_empty());
        println!("  Percent identity: {:.2}", entry.hit_score);
        println!("  Sequence length: {}", entry.sequence.len());
    }
}

fn print_tsv_entries(entries: &[&SequenceEntry]) {
    println!("short_name\taccession\torganism\tpercent_identity\tsequence_length");
    for entry in entries {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            entry.canonical_name,
            entry.accession.as_deref().unwrap_or(""),
            entry.organism_or_empty(),
            entry.hit_score,
            entry.sequence.len(),
        );
    }
}
