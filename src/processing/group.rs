//! Frequency tables over a single column.
//!
//! Counts are always returned sorted by key, so "most frequent" lookups are deterministic:
//! on a tie the smallest key wins.

use crate::types::{DataSet, Value};

/// A `(key, count)` frequency table sorted ascending by key.
pub type ValueCounts = Vec<(Value, usize)>;

/// Count non-null values of `column`, sorted by key.
///
/// Returns `None` when the column does not exist.
pub fn value_counts(dataset: &DataSet, column: &str) -> Option<ValueCounts> {
    let values = dataset.column(column)?.filter(|v| !v.is_null()).cloned();
    Some(count_sorted(values))
}

/// Count arbitrary keys (e.g. values derived from several columns), sorted by key.
pub fn count_sorted(values: impl IntoIterator<Item = Value>) -> ValueCounts {
    let mut values: Vec<Value> = values.into_iter().collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mut out: ValueCounts = Vec::new();
    for v in values {
        match out.last_mut() {
            Some((key, n)) if key.total_cmp(&v).is_eq() => *n += 1,
            _ => out.push((v, 1)),
        }
    }
    out
}

/// The entry with the highest count; ties resolve to the earliest (smallest) key.
pub fn most_frequent(counts: &[(Value, usize)]) -> Option<(&Value, usize)> {
    let mut best: Option<(&Value, usize)> = None;
    for (key, n) in counts {
        if best.is_none_or(|(_, b)| *n > b) {
            best = Some((key, *n));
        }
    }
    best
}

/// Most common non-null value of `column` (smallest on ties).
pub fn mode(dataset: &DataSet, column: &str) -> Option<Value> {
    let counts = value_counts(dataset, column)?;
    most_frequent(&counts).map(|(v, _)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::{count_sorted, mode, most_frequent, value_counts};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn hours(values: &[Option<i64>]) -> DataSet {
        let schema = Schema::new(vec![Field::new("Hour", DataType::Int64)]);
        let rows = values
            .iter()
            .map(|v| vec![v.map_or(Value::Null, Value::Int64)])
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn value_counts_sorts_numerically_and_skips_nulls() {
        let ds = hours(&[Some(10), Some(8), Some(9), Some(8), None]);
        let counts = value_counts(&ds, "Hour").unwrap();
        assert_eq!(
            counts,
            vec![(Value::Int64(8), 2), (Value::Int64(9), 1), (Value::Int64(10), 1)]
        );
    }

    #[test]
    fn most_frequent_breaks_ties_by_smallest_key() {
        let counts = count_sorted(
            ["wednesday", "monday", "wednesday", "monday", "friday"]
                .into_iter()
                .map(|s| Value::Utf8(s.to_string())),
        );
        let (key, n) = most_frequent(&counts).unwrap();
        assert_eq!(key, &Value::Utf8("monday".to_string()));
        assert_eq!(n, 2);
    }

    #[test]
    fn mode_prefers_smallest_key_on_ties() {
        let ds = hours(&[Some(17), Some(8), Some(17), Some(8)]);
        assert_eq!(mode(&ds, "Hour"), Some(Value::Int64(8)));
        assert_eq!(mode(&hours(&[None]), "Hour"), None);
        assert_eq!(mode(&ds, "Month"), None);
    }
}
