//! Tokenizer for FASTA-like record dumps.
//!
//! Records are `>`-delimited blocks. Line breaks carry no meaning here: they
//! are removed before splitting so every record body becomes a single line
//! holding the accession, free text, organism annotation and sequence.
//!
//! Supported extensions for reading:
//! - any uncompressed file
//! - `.gz`, `.bgz` (gzip/bgzip compressed)

use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::core::record::RawRecord;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a whole input file into memory, gunzipping when the extension says so.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns the underlying IO error if the file cannot be opened or read.
pub fn read_input_text(path: &Path) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        MultiGzDecoder::new(file).read_to_end(&mut bytes)?;
    } else {
        std::io::BufReader::new(file).read_to_end(&mut bytes)?;
    }

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Remove `\r\n` and `\n` so each record collapses onto one line
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "").replace('\n', "")
}

/// Split normalized text on `>` into records, in file order.
///
/// The delimiter is dropped and empty fields are skipped.
pub fn split_records(text: &str) -> impl Iterator<Item = RawRecord<'_>> {
    text.split('>')
        .filter(|field| !field.is_empty())
        .map(RawRecord::new)
}
