//! # fasta-reconcile
//!
//! A library for reconciling two FASTA sequence dumps by organism.
//!
//! Two protein or nucleotide dumps produced independently (for example, hits
//! from two BLAST searches) rarely describe an organism the same way:
//! `[Escherichia coli K-12]` in one file is `[Escherichia coli O157:H7]` in the
//! other, and each file may hold many records per organism.
//!
//! `fasta-reconcile` reduces every bracketed organism annotation to a
//! genus/species key, keeps the best record per key in each file, and joins
//! the two files on that key.
//!
//! ## Features
//!
//! - **Name canonicalization**: strain, serotype and numeric qualifiers are
//!   dropped from the join key
//! - **Quality filter**: `LOW QUALITY PROTEIN` and `partial` records are ignored
//! - **Identity floor**: records under 50% identity in the hit table are ignored
//! - **Best hit**: highest percent identity (or longest sequence) wins per organism
//! - **Inner join**: only organisms present in both files are reported
//!
//! ## Example
//!
//! ```rust
//! use fasta_reconcile::{build_entry_map, join_entry_maps, BuildConfig, NameCanonicalizer};
//!
//! let canonicalizer = NameCanonicalizer::new().unwrap();
//! let config = BuildConfig::default().with_min_identity(None);
//!
//! let (first, _) = build_entry_map(">A1 x [Organism x]\nMKV\n", None, &config, &canonicalizer);
//! let (second, _) = build_entry_map(">B1 y [Organism y]\nMKV\n", None, &config, &canonicalizer);
//!
//! assert!(join_entry_maps(first, second).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Record, entry and configuration types
//! - [`parsing`]: FASTA tokenizer and hit table loader
//! - [`matching`]: Canonicalization, deduplication and the join
//! - [`pipeline`]: Concurrent processing of the two inputs
//! - [`report`]: CSV output of the merged table
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::record::{EntryMap, MergedRow, RawRecord, SequenceEntry};
pub use crate::core::types::*;
pub use crate::matching::{build_entry_map, join_entry_maps, sort_rows, EntryMapBuilder, NameCanonicalizer};
pub use crate::parsing::scores::HitScoreTable;
pub use crate::pipeline::{FileInput, FileResult, PipelineError};
