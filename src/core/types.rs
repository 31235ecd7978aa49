use serde::{Deserialize, Serialize};

/// Minimum percent identity a record must reach when a floor is enforced
pub const DEFAULT_MIN_IDENTITY: f64 = 50.0;

/// Substrings that mark a record as unreliable or fragmentary
pub const DEFAULT_REJECT_MARKERS: [&str; 2] = ["LOW QUALITY PROTEIN", "partial"];

/// How to choose between two records that share a canonical name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Keep the record with the strictly higher hit score
    #[default]
    HitScore,
    /// Keep the record with the strictly longer sequence payload
    Length,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HitScore => write!(f, "hit-score"),
            Self::Length => write!(f, "length"),
        }
    }
}

/// Settings for building one per-file entry map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Records scoring below this are dropped. `None` disables the floor.
    pub min_identity: Option<f64>,

    /// Tie-break between records sharing a canonical name
    pub selection: SelectionPolicy,

    /// Case-sensitive substrings that disqualify a record
    pub reject_markers: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            min_identity: Some(DEFAULT_MIN_IDENTITY),
            selection: SelectionPolicy::default(),
            reject_markers: DEFAULT_REJECT_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub fn with_min_identity(mut self, min_identity: Option<f64>) -> Self {
        self.min_identity = min_identity;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Whether `text` contains any of the configured reject markers
    pub fn is_rejected(&self, text: &str) -> bool {
        self.reject_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

/// Counts of what happened to each record while building an entry map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Records seen after tokenization
    pub records: usize,
    /// Dropped for carrying a reject marker
    pub low_quality: usize,
    /// Dropped for scoring under the identity floor
    pub below_floor: usize,
    /// Dropped for having no `]`
    pub malformed: usize,
    /// Records with no organism annotation that reached the map under the
    /// empty name, whether or not they survived the tie-break
    pub unannotated: usize,
    /// Times a stored entry was displaced by a better record
    pub replaced: usize,
}

impl BuildStats {
    /// Total records dropped without reaching the map
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.low_quality + self.below_floor + self.malformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.min_identity, Some(50.0));
        assert_eq!(config.selection, SelectionPolicy::HitScore);
        assert_eq!(config.reject_markers.len(), 2);
    }

    #[test]
    fn test_reject_markers_are_case_sensitive() {
        let config = BuildConfig::default();
        assert!(config.is_rejected("XP_1 LOW QUALITY PROTEIN: kinase [Mus musculus]"));
        assert!(config.is_rejected("XP_2 kinase, partial [Mus musculus]"));
        assert!(!config.is_rejected("XP_3 low quality protein [Mus musculus]"));
        assert!(!config.is_rejected("XP_4 kinase, Partial [Mus musculus]"));
    }

    #[test]
    fn test_selection_policy_serde_names() {
        let json = serde_json::to_string(&SelectionPolicy::HitScore).unwrap();
        assert_eq!(json, "\"hit-score\"");
        assert_eq!(SelectionPolicy::Length.to_string(), "length");
    }

    #[test]
    fn test_stats_skipped() {
        let stats = BuildStats {
            records: 10,
            low_quality: 2,
            below_floor: 3,
            malformed: 1,
            unannotated: 1,
            replaced: 2,
        };
        assert_eq!(stats.skipped(), 6);
    }
}
