//! Output of the merged table.
//!
//! The table is CSV with a header row; [`ColumnLayout`] picks the columns.
//!
//! [`ColumnLayout`]: table::ColumnLayout

pub mod table;
