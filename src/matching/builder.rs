//! Per-file filtering and best-record selection.

use std::collections::hash_map::Entry;

use tracing::debug;

use crate::core::record::{EntryMap, RawRecord, SequenceEntry};
use crate::core::types::{BuildConfig, BuildStats, SelectionPolicy};
use crate::matching::canonical::NameCanonicalizer;
use crate::parsing::fasta::{normalize_line_endings, split_records};
use crate::parsing::scores::HitScoreTable;

/// Accumulates the best record per canonical name for one input file.
///
/// Records are pushed in file order. A stored entry is only displaced by a
/// strictly better record, so on ties the first record seen wins.
pub struct EntryMapBuilder<'a> {
    config: &'a BuildConfig,
    canonicalizer: &'a NameCanonicalizer,
    scores: Option<&'a HitScoreTable>,
    entries: EntryMap,
    stats: BuildStats,
}

impl<'a> EntryMapBuilder<'a> {
    /// `scores` is `None` when the input has no hit table; every record then
    /// scores 0.0 and the identity floor is not applied.
    pub fn new(
        config: &'a BuildConfig,
        canonicalizer: &'a NameCanonicalizer,
        scores: Option<&'a HitScoreTable>,
    ) -> Self {
        Self {
            config,
            canonicalizer,
            scores,
            entries: EntryMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Offer one record to the map
    pub fn push(&mut self, record: RawRecord<'_>) {
        self.stats.records += 1;
        let text = record.text();

        if self.config.is_rejected(text) {
            self.stats.low_quality += 1;
            debug!("Skipping low quality record: {}", preview(text));
            return;
        }

        let accession = record.accession();
        let hit_score = match (self.scores, accession) {
            (Some(scores), Some(acc)) => scores.get(acc),
            _ => 0.0,
        };

        if let (Some(floor), Some(_)) = (self.config.min_identity, self.scores) {
            if hit_score < floor {
                self.stats.below_floor += 1;
                debug!(
                    "Skipping {} below identity floor ({hit_score} < {floor})",
                    accession.unwrap_or("<no accession>")
                );
                return;
            }
        }

        let organism = record.annotation();
        let canonical_name = self.canonicalizer.canonical_name(&record);

        let Some(sequence) = record.payload() else {
            self.stats.malformed += 1;
            debug!("Skipping record without closing bracket: {}", preview(text));
            return;
        };

        if organism.is_none() {
            self.stats.unannotated += 1;
        }

        let candidate = SequenceEntry {
            canonical_name: canonical_name.clone(),
            organism: organism.map(str::to_string),
            accession: accession.map(str::to_string),
            record: text.to_string(),
            sequence: sequence.to_string(),
            hit_score,
        };

        match self.entries.entry(canonical_name) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if is_better(self.config.selection, &candidate, slot.get()) {
                    debug!(
                        "Replacing entry for '{}' ({} -> {})",
                        slot.key(),
                        slot.get().accession.as_deref().unwrap_or("?"),
                        candidate.accession.as_deref().unwrap_or("?"),
                    );
                    slot.insert(candidate);
                    self.stats.replaced += 1;
                }
            }
        }
    }

    /// The surviving entries and the counters gathered while building them
    #[must_use]
    pub fn finish(self) -> (EntryMap, BuildStats) {
        (self.entries, self.stats)
    }
}

/// Strict comparison: equal candidates never displace the stored entry
fn is_better(policy: SelectionPolicy, candidate: &SequenceEntry, stored: &SequenceEntry) -> bool {
    match policy {
        SelectionPolicy::HitScore => candidate.hit_score > stored.hit_score,
        SelectionPolicy::Length => candidate.sequence.len() > stored.sequence.len(),
    }
}

/// Short prefix of a record for log lines
fn preview(text: &str) -> &str {
    match text.char_indices().nth(60) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Tokenize raw file text and build its entry map
#[must_use]
pub fn build_entry_map(
    text: &str,
    scores: Option<&HitScoreTable>,
    config: &BuildConfig,
    canonicalizer: &NameCanonicalizer,
) -> (EntryMap, BuildStats) {
    let normalized = normalize_line_endings(text);
    let mut builder = EntryMapBuilder::new(config, canonicalizer, scores);
    for record in split_records(&normalized) {
        builder.push(record);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::scores::parse_score_text;

    fn canon() -> NameCanonicalizer {
        NameCanonicalizer::new().unwrap()
    }

    fn no_floor() -> BuildConfig {
        BuildConfig::default().with_min_identity(None)
    }

    #[test]
    fn test_keeps_highest_score() {
        let fasta = ">A1 gyrase [Escherichia coli K-12]\nMKV\n\
                     >A2 gyrase [Escherichia coli O157]\nMKVLL\n\
                     >A3 gyrase [Escherichia coli]\nMK\n";
        let scores = parse_score_text("q,A1,40\nq,A2,90\nq,A3,60\n").unwrap();

        let (map, stats) = build_entry_map(fasta, Some(&scores), &no_floor(), &canon());
        assert_eq!(map.len(), 1);
        let entry = &map["Escherichia coli"];
        assert_eq!(entry.accession.as_deref(), Some("A2"));
        assert!((entry.hit_score - 90.0).abs() < f64::EPSILON);
        assert_eq!(entry.organism.as_deref(), Some("Escherichia coli O157"));
        assert_eq!(entry.sequence, "MKVLL");
        assert_eq!(stats.records, 3);
        assert_eq!(stats.replaced, 1);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let fasta = ">A1 x [Mus musculus]\nAAA\n>A2 x [Mus musculus]\nCCCC\n";
        let scores = parse_score_text("q,A1,75\nq,A2,75\n").unwrap();

        let (map, stats) = build_entry_map(fasta, Some(&scores), &no_floor(), &canon());
        assert_eq!(map["Mus musculus"].accession.as_deref(), Some("A1"));
        assert_eq!(stats.replaced, 0);
    }

    #[test]
    fn test_quality_markers_rejected_regardless_of_score() {
        let fasta = ">A1 LOW QUALITY PROTEIN: kinase [Mus musculus]\nAAA\n\
                     >A2 kinase, partial [Mus musculus]\nCCC\n\
                     >A3 kinase [Mus musculus]\nGGG\n";
        let scores = parse_score_text("q,A1,100\nq,A2,100\nq,A3,55\n").unwrap();

        let (map, stats) = build_entry_map(fasta, Some(&scores), &BuildConfig::default(), &canon());
        assert_eq!(map["Mus musculus"].accession.as_deref(), Some("A3"));
        assert_eq!(stats.low_quality, 2);
    }

    #[test]
    fn test_identity_floor() {
        let fasta = ">A1 x [Mus musculus]\nAAA\n>A2 x [Homo sapiens]\nCCC\n>A3 x [Danio rerio]\nGGG\n";
        let scores = parse_score_text("q,A1,49.9\nq,A2,50.0\n").unwrap();

        let (map, stats) = build_entry_map(fasta, Some(&scores), &BuildConfig::default(), &canon());
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Homo sapiens"));
        assert_eq!(stats.below_floor, 2);
    }

    #[test]
    fn test_floor_ignored_without_score_table() {
        let fasta = ">A1 x [Mus musculus]\nAAA\n";
        let (map, stats) = build_entry_map(fasta, None, &BuildConfig::default(), &canon());
        assert_eq!(map.len(), 1);
        assert_eq!(stats.below_floor, 0);
        assert!(map["Mus musculus"].hit_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_records_without_closing_bracket_skipped() {
        let fasta = ">A1 x [Mus musculus\nAAA\n>A2 plain record\nCCC\n>A3 x [Homo sapiens]\nGGG\n";
        let (map, stats) = build_entry_map(fasta, None, &no_floor(), &canon());
        assert_eq!(map.len(), 1);
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn test_unannotated_records_share_empty_key() {
        let fasta = ">A1 x ] AAA\n>A2 y ] CCCC\n";
        let scores = parse_score_text("q,A1,10\nq,A2,20\n").unwrap();

        let (map, stats) = build_entry_map(fasta, Some(&scores), &no_floor(), &canon());
        assert_eq!(map.len(), 1);
        let entry = &map[""];
        assert_eq!(entry.accession.as_deref(), Some("A2"));
        assert!(entry.organism.is_none());
        assert_eq!(stats.unannotated, 2);
    }

    #[test]
    fn test_length_policy_keeps_longest_sequence() {
        let fasta = ">A1 x [Mus musculus]\nAAAA\n>A2 x [Mus musculus]\nCCCCCC\n>A3 x [Mus musculus]\nGGGGGG\n";
        let config = no_floor().with_selection(SelectionPolicy::Length);

        let (map, _) = build_entry_map(fasta, None, &config, &canon());
        assert_eq!(map["Mus musculus"].accession.as_deref(), Some("A2"));
    }

    #[test]
    fn test_unlisted_accession_scores_zero() {
        let fasta = ">A1 x [Mus musculus]\nAAA\n>A2 x [Mus musculus]\nCCC\n";
        let scores = parse_score_text("q,A2,1.5\n").unwrap();

        let (map, _) = build_entry_map(fasta, Some(&scores), &no_floor(), &canon());
        assert_eq!(map["Mus musculus"].accession.as_deref(), Some("A2"));
    }

    #[test]
    fn test_record_keeps_full_text() {
        let fasta = ">A1 gyrase [Mus musculus]\r\nMKV\r\nLL\r\n";
        let (map, _) = build_entry_map(fasta, None, &no_floor(), &canon());
        assert_eq!(map["Mus musculus"].record, "A1 gyrase [Mus musculus]MKVLL");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "A".repeat(100);
        assert_eq!(preview(&long).len(), 60);
        assert_eq!(preview("short"), "short");
    }
}
