//! Fork-join orchestration of the two per-file pipelines.
//!
//! Each input runs read -> score table -> tokenize -> build on its own
//! blocking task. Both tasks are awaited together; the first failure is
//! returned and nothing downstream runs.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::record::EntryMap;
use crate::core::types::{BuildConfig, BuildStats};
use crate::matching::builder::build_entry_map;
use crate::matching::canonical::NameCanonicalizer;
use crate::parsing::fasta::read_input_text;
use crate::parsing::scores::{load_score_file, ScoreTableError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid hit-score table {}: {source}", .path.display())]
    ScoreTable {
        path: PathBuf,
        #[source]
        source: ScoreTableError,
    },

    #[error("Worker for {label} did not complete: {message}")]
    Worker { label: String, message: String },

    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// One FASTA dump and its optional hit table
#[derive(Debug, Clone)]
pub struct FileInput {
    /// Name used in logs and errors ("first", "second", ...)
    pub label: String,
    pub fasta: PathBuf,
    pub scores: Option<PathBuf>,
}

impl FileInput {
    pub fn new(label: impl Into<String>, fasta: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            fasta: fasta.into(),
            scores: None,
        }
    }

    #[must_use]
    pub fn with_scores(mut self, scores: impl Into<PathBuf>) -> Self {
        self.scores = Some(scores.into());
        self
    }
}

/// Output of one file pipeline
#[derive(Debug, Clone)]
pub struct FileResult {
    pub input: FileInput,
    pub entries: EntryMap,
    pub stats: BuildStats,
}

/// Run one file end to end on the current thread
///
/// # Errors
///
/// Returns `PipelineError::ScoreTable` if the hit table is unreadable or
/// holds a non-numeric identity, or `PipelineError::Read` if the FASTA file
/// cannot be read.
pub fn process_file(
    input: FileInput,
    config: &BuildConfig,
    canonicalizer: &NameCanonicalizer,
) -> Result<FileResult, PipelineError> {
    let scores = match &input.scores {
        Some(path) => Some(load_score_file(path).map_err(|source| PipelineError::ScoreTable {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    let text = read_input_text(&input.fasta).map_err(|source| PipelineError::Read {
        path: input.fasta.clone(),
        source,
    })?;

    let (entries, stats) = build_entry_map(&text, scores.as_ref(), config, canonicalizer);

    info!(
        "{}: {} records, {} organisms kept, {} skipped",
        input.label,
        stats.records,
        entries.len(),
        stats.skipped()
    );
    if entries.is_empty() {
        warn!("{}: no records survived filtering", input.label);
    }

    Ok(FileResult {
        input,
        entries,
        stats,
    })
}

fn spawn_worker(
    input: FileInput,
    config: Arc<BuildConfig>,
    canonicalizer: Arc<NameCanonicalizer>,
) -> JoinHandle<Result<FileResult, PipelineError>> {
    tokio::task::spawn_blocking(move || process_file(input, &config, &canonicalizer))
}

async fn await_worker(
    label: String,
    handle: JoinHandle<Result<FileResult, PipelineError>>,
) -> Result<FileResult, PipelineError> {
    handle.await.map_err(|e| PipelineError::Worker {
        label,
        message: e.to_string(),
    })?
}

/// Build both entry maps concurrently.
///
/// # Errors
///
/// Returns the first error raised by either pipeline, or
/// `PipelineError::Worker` if a worker panicked.
pub async fn process_pair(
    first: FileInput,
    second: FileInput,
    config: Arc<BuildConfig>,
    canonicalizer: Arc<NameCanonicalizer>,
) -> Result<(FileResult, FileResult), PipelineError> {
    let first_label = first.label.clone();
    let second_label = second.label.clone();

    let first_handle = spawn_worker(first, Arc::clone(&config), Arc::clone(&canonicalizer));
    let second_handle = spawn_worker(second, config, canonicalizer);

    tokio::try_join!(
        await_worker(first_label, first_handle),
        await_worker(second_label, second_handle),
    )
}

/// Blocking wrapper around [`process_pair`] that owns its runtime.
///
/// On failure the runtime is shut down in the background, so the call
/// returns without waiting for the other worker to finish.
///
/// # Errors
///
/// Returns `PipelineError::Runtime` if the tokio runtime cannot be created,
/// otherwise whatever [`process_pair`] returns.
pub fn run_pair(
    first: FileInput,
    second: FileInput,
    config: BuildConfig,
    canonicalizer: NameCanonicalizer,
) -> Result<(FileResult, FileResult), PipelineError> {
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(process_pair(
        first,
        second,
        Arc::new(config),
        Arc::new(canonicalizer),
    ));
    if result.is_err() {
        rt.shutdown_background();
    }
    result
}
