//! Row mapping for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] by applying `mapper` to every row.
///
/// This is a convenience wrapper around [`DataSet::map_rows`].
///
/// # Panics
///
/// Panics if `mapper` returns rows with a different length than the schema field count.
pub fn map<F>(dataset: &DataSet, mapper: F) -> DataSet
where
    F: FnMut(&[Value]) -> Vec<Value>,
{
    dataset.map_rows(mapper)
}

/// Replaces nulls in `column` with `fill`, returning the new dataset and the number of
/// cells filled.
///
/// Returns `None` when the column does not exist.
pub fn fill_null(dataset: &DataSet, column: &str, fill: &Value) -> Option<(DataSet, usize)> {
    let idx = dataset.schema.index_of(column)?;
    let mut filled = 0usize;
    let out = map(dataset, |row| {
        let mut out = row.to_vec();
        if out[idx].is_null() {
            out[idx] = fill.clone();
            filled += 1;
        }
        out
    });
    Some((out, filled))
}
