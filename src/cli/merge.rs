//! Merge command - join two FASTA dumps on canonical organism name.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{FilterArgs, OutputFormat};
use crate::core::types::{BuildConfig, BuildStats, SelectionPolicy};
use crate::matching::join::{join_entry_maps, sort_rows};
use crate::pipeline::{run_pair, FileInput, FileResult};
use crate::report::table::{write_table_file, ColumnLayout};
use crate::utils::validation::{check_input_file, ValidationError};

/// Arguments for the merge command
#[derive(Args)]
pub struct MergeArgs {
    /// First FASTA dump (plain or gzipped)
    #[arg(long, required = true)]
    pub first: PathBuf,

    /// Hit table for the first dump (CSV: ignored, accession, percent identity)
    #[arg(long)]
    pub first_scores: Option<PathBuf>,

    /// Second FASTA dump (plain or gzipped)
    #[arg(long, required = true)]
    pub second: PathBuf,

    /// Hit table for the second dump
    #[arg(long)]
    pub second_scores: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, default_value = "out.csv")]
    pub outfile: PathBuf,

    /// Columns to write
    #[arg(long, value_enum, default_value = "full")]
    pub columns: ColumnLayout,

    /// Sort rows by organism name
    #[arg(long)]
    pub sort: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Serialize)]
struct FileSummary {
    fasta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<String>,
    organisms: usize,
    #[serde(flatten)]
    stats: BuildStats,
}

impl From<&FileResult> for FileSummary {
    fn from(result: &FileResult) -> Self {
        Self {
            fasta: result.input.fasta.display().to_string(),
            scores: result
                .input
                .scores
                .as_ref()
                .map(|p| p.display().to_string()),
            organisms: result.entries.len(),
            stats: result.stats,
        }
    }
}

#[derive(Serialize)]
struct MergeSummary {
    first: FileSummary,
    second: FileSummary,
    rows: usize,
    output: String,
    config: BuildConfig,
}

/// Execute the merge command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, either input cannot be
/// processed, or the table cannot be written. Nothing is written unless both
/// inputs were processed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MergeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.filter.build_config()?;
    let canonicalizer = args.filter.canonicalizer()?;

    let first = file_input("first", &args.first, args.first_scores.as_deref(), &config)?;
    let second = file_input("second", &args.second, args.second_scores.as_deref(), &config)?;

    if verbose {
        eprintln!(
            "Merging {} and {} (select by {}, identity floor {})",
            args.first.display(),
            args.second.display(),
            config.selection,
            config
                .min_identity
                .map_or_else(|| "off".to_string(), |f| f.to_string()),
        );
    }

    let (first, second) = run_pair(first, second, config.clone(), canonicalizer)?;

    let first_summary = FileSummary::from(&first);
    let second_summary = FileSummary::from(&second);

    let mut rows = join_entry_maps(first.entries, second.entries);
    if args.sort {
        sort_rows(&mut rows);
    }

    if rows.is_empty() {
        warn!("No organisms are shared between the two inputs");
    }
    info!("{} shared organisms", rows.len());

    write_table_file(&args.outfile, &rows, args.columns)?;

    let summary = MergeSummary {
        first: first_summary,
        second: second_summary,
        rows: rows.len(),
        output: args.outfile.display().to_string(),
        config,
    };

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

/// Validate one input pair before any processing starts
fn file_input(
    label: &'static str,
    fasta: &Path,
    scores: Option<&Path>,
    config: &BuildConfig,
) -> Result<FileInput, ValidationError> {
    check_input_file(fasta)?;
    let mut input = FileInput::new(label, fasta);

    match scores {
        Some(path) => {
            check_input_file(path)?;
            input = input.with_scores(path);
        }
        None if config.selection == SelectionPolicy::HitScore => {
            return Err(ValidationError::MissingScoreTable(label));
        }
        None => {}
    }

    Ok(input)
}

fn print_file_summary(name: &str, file: &FileSummary) {
    println!("\n{name}: {}", file.fasta);
    if let Some(scores) = &file.scores {
        println!("  Hit table: {scores}");
    }
    println!("  Records: {}", file.stats.records);
    println!("  Organisms kept: {}", file.organisms);
    println!("  Low quality: {}", file.stats.low_quality);
    println!("  Below identity floor: {}", file.stats.below_floor);
    println!("  Malformed: {}", file.stats.malformed);
    println!("  Unannotated: {}", file.stats.unannotated);
    println!("  Replaced by better hit: {}", file.stats.replaced);
}

fn print_text_summary(summary: &MergeSummary) {
    println!("Merge Results");
    println!("{}", "=".repeat(60));

    print_file_summary("First", &summary.first);
    print_file_summary("Second", &summary.second);

    println!("\nShared organisms: {}", summary.rows);
    println!("Output: {}", summary.output);
}

fn print_tsv_summary(summary: &MergeSummary) {
    println!("input\tfasta\trecords\torganisms\tskipped\treplaced");
    for (name, file) in [("first", &summary.first), ("second", &summary.second)] {
        println!(
            "{name}\t{}\t{}\t{}\t{}\t{}",
            file.fasta,
            file.stats.records,
            file.organisms,
            file.stats.skipped(),
            file.stats.replaced,
        );
    }
    println!("shared\t{}\t\t{}\t\t", summary.output, summary.rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_table_rejected_for_hit_score() {
        let fasta = tempfile::NamedTempFile::new().unwrap();
        let result = file_input("first", fasta.path(), None, &BuildConfig::default());
        assert!(matches!(result, Err(ValidationError::MissingScoreTable("first"))));
    }

    #[test]
    fn test_missing_score_table_allowed_for_length() {
        let fasta = tempfile::NamedTempFile::new().unwrap();
        let config = BuildConfig::default().with_selection(SelectionPolicy::Length);
        let input = file_input("first", fasta.path(), None, &config).unwrap();
        assert!(input.scores.is_none());
    }

    #[test]
    fn test_missing_fasta_rejected() {
        let result = file_input(
            "second",
            Path::new("/nonexistent/b.faa"),
            None,
            &BuildConfig::default(),
        );
        assert!(matches!(result, Err(ValidationError::MissingInput(_))));
    }
}
