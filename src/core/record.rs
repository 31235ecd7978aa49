use serde::Serialize;
use std::collections::HashMap;

/// One `>`-delimited record body, borrowed from the normalized file text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a>(&'a str);

impl<'a> RawRecord<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.0
    }

    /// First whitespace-delimited token, used to look up the hit score
    #[must_use]
    pub fn accession(&self) -> Option<&'a str> {
        self.0.split_whitespace().next()
    }

    /// Text between the first `[` and the last `]`.
    ///
    /// The closing bracket is the rightmost one so nested or repeated
    /// bracket pairs stay inside the annotation.
    #[must_use]
    pub fn annotation(&self) -> Option<&'a str> {
        let start = self.0.find('[')? + 1;
        let end = self.0.rfind(']')?;
        if end < start {
            return None;
        }
        Some(&self.0[start..end])
    }

    /// Everything after the first `]`, or `None` if the record has none
    #[must_use]
    pub fn payload(&self) -> Option<&'a str> {
        self.0.split_once(']').map(|(_, rest)| rest)
    }
}

/// The record retained for one canonical name within one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceEntry {
    /// Join key
    pub canonical_name: String,

    /// Full bracketed annotation, when the record has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,

    /// Accession used for the hit-score lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,

    /// Whole record text, line endings removed
    pub record: String,

    /// Text after the first `]`
    pub sequence: String,

    /// Percent identity from the score table, 0.0 when unlisted
    pub hit_score: f64,
}

impl SequenceEntry {
    /// Organism annotation for display, empty when absent
    #[must_use]
    pub fn organism_or_empty(&self) -> &str {
        self.organism.as_deref().unwrap_or("")
    }
}

/// Surviving entries of one input file, keyed by canonical name
pub type EntryMap = HashMap<String, SequenceEntry>;

/// An organism present in both inputs, with the entry chosen from each
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub canonical_name: String,
    pub first: SequenceEntry,
    pub second: SequenceEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accession_is_first_token() {
        let record = RawRecord::new("WP_000001.1 DNA gyrase [Escherichia coli]MKVL");
        assert_eq!(record.accession(), Some("WP_000001.1"));
        assert_eq!(RawRecord::new("   ").accession(), None);
    }

    #[test]
    fn test_annotation_uses_last_closing_bracket() {
        let record = RawRecord::new("X1 protein [Vibrio [cholerae] O1]MKV");
        assert_eq!(record.annotation(), Some("Vibrio [cholerae] O1"));

        let record = RawRecord::new("X1 a [Homo sapiens] b [Mus musculus]MKV");
        assert_eq!(record.annotation(), Some("Homo sapiens] b [Mus musculus"));
    }

    #[test]
    fn test_annotation_absent() {
        assert_eq!(RawRecord::new("X1 protein MKV").annotation(), None);
        assert_eq!(RawRecord::new("X1 protein [Homo sapiens").annotation(), None);
        assert_eq!(RawRecord::new("X1 ] protein [Homo").annotation(), None);
        assert_eq!(RawRecord::new("X1 protein []MKV").annotation(), Some(""));
    }

    #[test]
    fn test_payload_after_first_bracket() {
        let record = RawRecord::new("X1 a [Homo sapiens]MKV]LL");
        assert_eq!(record.payload(), Some("MKV]LL"));
        assert_eq!(RawRecord::new("X1 no brackets").payload(), None);
        assert_eq!(RawRecord::new("X1 [Homo sapiens]").payload(), Some(""));
    }
}
