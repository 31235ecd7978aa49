//! Readers for the two input kinds.
//!
//! - **FASTA-like dumps** ([`fasta`]): read whole, collapsed to one line per
//!   record, split on `>`
//! - **Hit tables** ([`scores`]): comma-separated, accession in column 1 and
//!   percent identity in column 2 (0-based)
//!
//! ## Example
//!
//! ```rust
//! use fasta_reconcile::parsing::fasta::{normalize_line_endings, split_records};
//! use fasta_reconcile::parsing::scores::parse_score_text;
//!
//! let text = normalize_line_endings(">WP_1 gyrase [Escherichia coli K-12]\nMKV\n");
//! let records: Vec<_> = split_records(&text).collect();
//! assert_eq!(records[0].accession(), Some("WP_1"));
//!
//! let scores = parse_score_text("q,WP_1,97.5\n").unwrap();
//! assert_eq!(scores.get("WP_1"), 97.5);
//! ```

pub mod fasta;
pub mod scores;
