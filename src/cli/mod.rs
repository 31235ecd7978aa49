//! Command-line interface for fasta-reconcile.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **merge**: Join two FASTA dumps on organism and write the merged table
//! - **inspect**: Show the record kept per organism for a single FASTA dump
//!
//! ## Usage
//!
//! ```text
//! # Merge two dumps with their BLAST hit tables
//! fasta-reconcile merge --first a.faa --first-scores a.csv \
//!     --second b.faa --second-scores b.csv --outfile merged.csv
//!
//! # Keep the longest sequence per organism, no hit tables needed
//! fasta-reconcile merge --first a.faa --second b.faa --select-by length
//!
//! # See which record survives for each organism in one file
//! fasta-reconcile inspect --input a.faa --scores a.csv --format json
//! ```

use clap::{Args, Parser, Subcommand};

use crate::core::types::{BuildConfig, SelectionPolicy, DEFAULT_MIN_IDENTITY};
use crate::matching::canonical::{NameCanonicalizer, DEFAULT_QUALIFIER_PATTERN};
use crate::utils::validation::validate_identity_floor;

pub mod inspect;
pub mod merge;

#[derive(Parser)]
#[command(name = "fasta-reconcile")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Merge two FASTA dumps into a table of organisms present in both")]
#[command(
    long_about = "fasta-reconcile matches records from two FASTA dumps by organism name.\n\nEach record's bracketed organism annotation is reduced to a genus/species key, low quality and low identity records are dropped, and the best record per organism is kept from each file. Organisms found in both files are written to a CSV table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the run report
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge two FASTA dumps into one table
    Merge(merge::MergeArgs),

    /// Show the best record per organism for one FASTA dump
    Inspect(inspect::InspectArgs),
}

/// Record filtering options shared by all commands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Drop records whose percent identity is below this value
    #[arg(long, default_value_t = DEFAULT_MIN_IDENTITY, conflicts_with = "no_identity_floor")]
    pub min_identity: f64,

    /// Keep records regardless of percent identity
    #[arg(long)]
    pub no_identity_floor: bool,

    /// How to pick between records for the same organism
    #[arg(long, value_enum, default_value = "hit-score")]
    pub select_by: SelectionPolicy,

    /// Regex for words that end an organism name (matched against the whole word)
    #[arg(long, default_value = DEFAULT_QUALIFIER_PATTERN)]
    pub qualifier_pattern: String,
}

impl FilterArgs {
    /// # Errors
    ///
    /// Returns an error if the identity floor is not a finite number.
    pub fn build_config(&self) -> anyhow::Result<BuildConfig> {
        let min_identity = if self.no_identity_floor {
            None
        } else {
            Some(validate_identity_floor(self.min_identity)?)
        };

        Ok(BuildConfig::default()
            .with_min_identity(min_identity)
            .with_selection(self.select_by))
    }

    /// # Errors
    ///
    /// Returns an error if the qualifier pattern is not a valid regex.
    pub fn canonicalizer(&self) -> anyhow::Result<NameCanonicalizer> {
        NameCanonicalizer::with_pattern(&self.qualifier_pattern).map_err(|e| {
            anyhow::anyhow!("Invalid qualifier pattern '{}': {e}", self.qualifier_pattern)
        })
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
