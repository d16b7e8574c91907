//! Reduction operations for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
    /// Arithmetic mean of finite numeric values, ignoring nulls.
    Mean,
    /// Sample standard deviation (n - 1 denominator) of finite numeric values, ignoring nulls.
    StdDev,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if there are no non-null values.
/// - `Mean` and `StdDev` always produce `Float64`, or `Null` when there are too few values
///   (none for `Mean`, fewer than two for `StdDev`).
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;

    match op {
        ReduceOp::Count => Some(Value::Int64(dataset.row_count() as i64)),
        ReduceOp::Mean => {
            Some(mean(finite_values(dataset, idx)).map_or(Value::Null, Value::Float64))
        }
        ReduceOp::StdDev => {
            Some(sample_std(finite_values(dataset, idx)).map_or(Value::Null, Value::Float64))
        }
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => match dataset.schema.fields.get(idx) {
            Some(field) => reduce_numeric_typed(dataset, idx, field.data_type.clone(), op),
            None => None,
        },
    }
}

/// Numeric cells of one column; NaN and infinities are skipped.
fn finite_values(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset
        .rows
        .iter()
        .filter_map(|row| row.get(idx).and_then(Value::as_f64))
        .filter(|v| v.is_finite())
        .collect()
}

fn mean(values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std(values: Vec<f64>) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let m = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (n - 1.0)).sqrt())
}

fn reduce_numeric_typed(
    dataset: &DataSet,
    idx: usize,
    data_type: DataType,
    op: ReduceOp,
) -> Option<Value> {
    match data_type {
        DataType::Int64 => {
            let mut acc: Option<i64> = None;
            for row in &dataset.rows {
                if let Some(Value::Int64(v)) = row.get(idx) {
                    acc = Some(match (op, acc) {
                        (ReduceOp::Sum, Some(a)) => a + v,
                        (ReduceOp::Min, Some(a)) => a.min(*v),
                        (ReduceOp::Max, Some(a)) => a.max(*v),
                        (_, _) => *v,
                    });
                }
            }
            Some(acc.map(Value::Int64).unwrap_or(Value::Null))
        }
        DataType::Float64 => {
            let mut acc: Option<f64> = None;
            for row in &dataset.rows {
                if let Some(Value::Float64(v)) = row.get(idx) {
                    acc = Some(match (op, acc) {
                        (ReduceOp::Sum, Some(a)) => a + v,
                        (ReduceOp::Min, Some(a)) => a.min(*v),
                        (ReduceOp::Max, Some(a)) => a.max(*v),
                        (_, _) => *v,
                    });
                }
            }
            Some(acc.map(Value::Float64).unwrap_or(Value::Null))
        }
        _ => Some(Value::Null),
    }
}
