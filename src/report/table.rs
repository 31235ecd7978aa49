use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::core::record::MergedRow;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column set of the merged table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColumnLayout {
    /// ShortName, Organism1, PERCENTIDENT1, FILE1, Organism2, PERCENTIDENT2, FILE2
    #[default]
    Full,
    /// Organism, FILE1, FILE2
    Compact,
}

#[derive(Serialize)]
struct FullRow<'a> {
    #[serde(rename = "ShortName")]
    short_name: &'a str,
    #[serde(rename = "Organism1")]
    organism1: &'a str,
    #[serde(rename = "PERCENTIDENT1")]
    percent_ident1: f64,
    #[serde(rename = "FILE1")]
    file1: &'a str,
    #[serde(rename = "Organism2")]
    organism2: &'a str,
    #[serde(rename = "PERCENTIDENT2")]
    percent_ident2: f64,
    #[serde(rename = "FILE2")]
    file2: &'a str,
}

impl<'a> From<&'a MergedRow> for FullRow<'a> {
    fn from(row: &'a MergedRow) -> Self {
        Self {
            short_name: &row.canonical_name,
            organism1: row.first.organism_or_empty(),
            percent_ident1: row.first.hit_score,
            file1: &row.first.record,
            organism2: row.second.organism_or_empty(),
            percent_ident2: row.second.hit_score,
            file2: &row.second.record,
        }
    }
}

#[derive(Serialize)]
struct CompactRow<'a> {
    #[serde(rename = "Organism")]
    organism: &'a str,
    #[serde(rename = "FILE1")]
    file1: &'a str,
    #[serde(rename = "FILE2")]
    file2: &'a str,
}

impl<'a> From<&'a MergedRow> for CompactRow<'a> {
    fn from(row: &'a MergedRow) -> Self {
        Self {
            organism: &row.canonical_name,
            file1: &row.first.record,
            file2: &row.second.record,
        }
    }
}

/// Write rows as CSV with a header line.
///
/// The header is written even when there are no rows.
///
/// # Errors
///
/// Returns `TableError::Csv` if serialization or the underlying write fails.
pub fn write_rows<W: Write>(
    writer: W,
    rows: &[MergedRow],
    layout: ColumnLayout,
) -> Result<(), TableError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    match layout {
        ColumnLayout::Full => {
            csv_writer.write_record([
                "ShortName",
                "Organism1",
                "PERCENTIDENT1",
                "FILE1",
                "Organism2",
                "PERCENTIDENT2",
                "FILE2",
            ])?;
            for row in rows {
                csv_writer.serialize(FullRow::from(row))?;
            }
        }
        ColumnLayout::Compact => {
            csv_writer.write_record(["Organism", "FILE1", "FILE2"])?;
            for row in rows {
                csv_writer.serialize(CompactRow::from(row))?;
            }
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the table to it
///
/// # Errors
///
/// Returns `TableError::Io` if the file cannot be created, or
/// `TableError::Csv` if writing fails.
pub fn write_table_file(
    path: &Path,
    rows: &[MergedRow],
    layout: ColumnLayout,
) -> Result<(), TableError> {
    let file = std::fs::File::create(path)?;
    write_rows(std::io::BufWriter::new(file), rows, layout)
}
