use crate::core::record::{EntryMap, MergedRow};

/// Inner join of two entry maps on canonical name.
///
/// Row order follows the first map's iteration order and is therefore
/// unspecified; use [`sort_rows`] when stable output is needed.
#[must_use]
pub fn join_entry_maps(first: EntryMap, mut second: EntryMap) -> Vec<MergedRow> {
    first
        .into_iter()
        .filter_map(|(name, entry)| {
            second.remove(&name).map(|other| MergedRow {
                canonical_name: name,
                first: entry,
                second: other,
            })
        })
        .collect()
}

/// Order rows by canonical name
pub fn sort_rows(rows: &mut [MergedRow]) {
    rows.sort_by(|a, b| a.canonical_name.cmp(&b.canonical_name));
}
