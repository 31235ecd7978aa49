use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid percent identity on line {line}: '{value}'")]
    InvalidIdentity { line: usize, value: String },
}

/// Percent identity per accession, from a BLAST-style CSV hit table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitScoreTable {
    scores: HashMap<String, f64>,
}

impl HitScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for `accession`, or 0.0 when the table does not list it
    #[must_use]
    pub fn get(&self, accession: &str) -> f64 {
        self.scores.get(accession).copied().unwrap_or(0.0)
    }

    /// Later inserts for the same accession win
    pub fn insert(&mut self, accession: impl Into<String>, score: f64) {
        self.scores.insert(accession.into(), score);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Load a hit table from disk
///
/// # Errors
///
/// Returns `ScoreTableError::Io` if the file cannot be read, or
/// `ScoreTableError::InvalidIdentity` if any identity value is not a number.
pub fn load_score_file(path: &Path) -> Result<HitScoreTable, ScoreTableError> {
    let content = crate::parsing::fasta::read_input_text(path)?;
    parse_score_text(&content)
}

/// Parse hit table text with columns: ignored, accession, percent identity.
///
/// Lines with fewer than 3 comma-separated fields are skipped. Any extra
/// columns past the third are ignored.
///
/// # Errors
///
/// Returns `ScoreTableError::InvalidIdentity` on the first identity value
/// that does not parse as a finite float (`NaN` and `inf` included). One corrupt value invalidates the table.
pub fn parse_score_text(text: &str) -> Result<HitScoreTable, ScoreTableError> {
    let mut table = HitScoreTable::new();

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            continue;
        }

        let accession = fields[1].trim();
        let raw = fields[2].trim();
        let score = raw
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| ScoreTableError::InvalidIdentity {
                line: i + 1,
                value: raw.to_string(),
            })?;

        table.insert(accession, score);
    }

    Ok(table)
}
