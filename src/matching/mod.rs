//! Organism keying, per-file deduplication and the cross-file join.
//!
//! - [`NameCanonicalizer`]: reduces `[Genus species strain ...]` annotations to a join key
//! - [`EntryMapBuilder`]: filters records and keeps the best one per key
//! - [`join_entry_maps`]: inner join of two per-file maps
//!
//! ## Record selection
//!
//! For each record, in file order:
//!
//! 1. **Quality filter**: drop records containing a reject marker
//!    (`LOW QUALITY PROTEIN`, `partial`)
//! 2. **Identity floor**: drop records whose hit score is under the floor
//!    (50.0 by default, only when a hit table was given)
//! 3. **Keying**: canonicalize the bracketed organism annotation
//! 4. **Payload**: drop records with no `]`
//! 5. **Best hit**: keep the first record per key unless a later one is
//!    strictly better (higher score, or longer sequence)
//!
//! ## Example
//!
//! ```rust
//! use fasta_reconcile::core::types::BuildConfig;
//! use fasta_reconcile::matching::{build_entry_map, join_entry_maps, NameCanonicalizer};
//! use fasta_reconcile::parsing::scores::parse_score_text;
//!
//! let canonicalizer = NameCanonicalizer::new().unwrap();
//! let config = BuildConfig::default();
//!
//! let a_scores = parse_score_text("q,A1,40\nq,A2,90\n").unwrap();
//! let (a, _) = build_entry_map(
//!     ">A1 x [Escherichia coli K-12]\nMK\n>A2 x [Escherichia coli]\nMKV\n",
//!     Some(&a_scores),
//!     &config,
//!     &canonicalizer,
//! );
//!
//! let b_scores = parse_score_text("q,B1,95\n").unwrap();
//! let (b, _) = build_entry_map(">B1 y [Escherichia coli O157]\nMKVL\n", Some(&b_scores), &config, &canonicalizer);
//!
//! let rows = join_entry_maps(a, b);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].first.accession.as_deref(), Some("A2"));
//! ```

pub mod builder;
pub mod canonical;
pub mod join;

pub use builder::{build_entry_map, EntryMapBuilder};
pub use canonical::NameCanonicalizer;
pub use join::{join_entry_maps, sort_rows};
