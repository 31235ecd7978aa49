//! Checks run on the command line before any input is processed.

use std::path::{Path, PathBuf};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("Input path is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("A hit-score table is required for {0} when selecting by hit score")]
    MissingScoreTable(&'static str),
    #[error("Identity floor must be a finite number, got {0}")]
    InvalidIdentityFloor(f64),
}

/// Ensure `path` exists and is a regular file
///
/// # Errors
///
/// Returns `ValidationError::MissingInput` if nothing exists at `path`, or
/// `ValidationError::NotAFile` for directories and other non-files.
pub fn check_input_file(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::MissingInput(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Reject NaN and infinite floors; any finite value is allowed since
/// hit scores are not clamped.
///
/// # Errors
///
/// Returns `ValidationError::InvalidIdentityFloor` for non-finite values.
pub fn validate_identity_floor(floor: f64) -> Result<f64, ValidationError> {
    if floor.is_finite() {
        Ok(floor)
    } else {
        Err(ValidationError::InvalidIdentityFloor(floor))
    }
}
