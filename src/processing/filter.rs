//! Row filtering for [`crate::types::DataSet`].

use std::collections::HashSet;

use crate::types::{DataSet, RowKey, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Removes rows that exactly repeat an earlier row. The first occurrence is kept.
pub fn drop_duplicates(dataset: &DataSet) -> DataSet {
    let mut seen: HashSet<RowKey<'_>> = HashSet::with_capacity(dataset.row_count());
    let rows = dataset
        .rows
        .iter()
        .filter(|row| seen.insert(RowKey(row.as_slice())))
        .cloned()
        .collect();
    DataSet::new(dataset.schema.clone(), rows)
}

/// Removes rows holding [`Value::Null`] in any of `columns`.
///
/// Columns absent from the schema are ignored.
pub fn drop_nulls(dataset: &DataSet, columns: &[&str]) -> DataSet {
    let idxs: Vec<usize> = columns
        .iter()
        .filter_map(|c| dataset.schema.index_of(c))
        .collect();
    dataset.filter_rows(|row| {
        idxs.iter()
            .all(|&i| !matches!(row.get(i), Some(Value::Null) | None))
    })
}
