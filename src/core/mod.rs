//! Core data types for record reconciliation.
//!
//! - [`RawRecord`]: a borrowed `>`-delimited record body
//! - [`SequenceEntry`]: the record kept for one organism in one file
//! - [`MergedRow`]: an organism found in both files
//! - [`BuildConfig`], [`SelectionPolicy`], [`BuildStats`]: per-file build settings and counters
//!
//! [`RawRecord`]: record::RawRecord
//! [`SequenceEntry`]: record::SequenceEntry
//! [`MergedRow`]: record::MergedRow
//! [`BuildConfig`]: types::BuildConfig
//! [`SelectionPolicy`]: types::SelectionPolicy
//! [`BuildStats`]: types::BuildStats

pub mod record;
pub mod types;
