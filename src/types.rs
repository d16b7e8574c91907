//! Core data model types.
//!
//! Trips are ingested into an in-memory [`DataSet`] using a [`Schema`] (a list of typed
//! [`Field`]s). Optional fields that are absent from the source are dropped from the
//! resulting schema, so column presence is checked with [`Schema::index_of`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Naive (zone-less) date and time.
    Timestamp,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
    /// Whether ingestion fails when the column is absent.
    pub required: bool,
}

impl Field {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: true,
        }
    }

    /// Create a field that may be missing from the source.
    pub fn optional(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: false,
        }
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Date and time without a time zone.
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value; integers are widened, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int64(_) | Value::Float64(_) => 2,
            Value::Timestamp(_) => 3,
            Value::Utf8(_) => 4,
        }
    }

    /// Total ordering used for sorting group keys.
    ///
    /// Nulls sort first; integers and floats compare numerically with each other.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Utf8(a), Value::Utf8(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    /// Hashes the value consistently with [`Value::total_cmp`] equality.
    fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int64(_) | Value::Float64(_) => {
                let v = self.as_f64().unwrap_or_default();
                // -0.0 and 0.0 compare equal.
                let v = if v == 0.0 { 0.0 } else { v };
                v.to_bits().hash(state);
            }
            Value::Utf8(s) => s.hash(state),
            Value::Timestamp(ts) => ts.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Borrowed row wrapper comparing and hashing by value, for duplicate detection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowKey<'a>(pub &'a [Value]);

impl PartialEq for RowKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0)
                .all(|(a, b)| a.total_cmp(b) == Ordering::Equal)
    }
}

impl Eq for RowKey<'_> {}

impl Hash for RowKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for v in self.0 {
            v.hash_into(state);
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the values of one column, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or(&Value::Null)))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Returns a new dataset with `field` computed from every row.
    ///
    /// An existing column with the same name is replaced in place; otherwise the column is
    /// appended.
    pub fn with_column<F>(&self, field: Field, mut compute: F) -> Self
    where
        F: FnMut(&[Value]) -> Value,
    {
        let existing = self.schema.index_of(&field.name);
        let mut schema = self.schema.clone();
        match existing {
            Some(idx) => schema.fields[idx] = field,
            None => schema.fields.push(field),
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let value = compute(row.as_slice());
                let mut out = row.clone();
                match existing {
                    Some(idx) => out[idx] = value,
                    None => out.push(value),
                }
                out
            })
            .collect();

        Self { schema, rows }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::HashSet;

    use super::{DataSet, DataType, Field, RowKey, Schema, Value};

    #[test]
    fn total_cmp_orders_mixed_numerics() {
        assert_eq!(Value::Int64(8).total_cmp(&Value::Int64(10)), Ordering::Less);
        assert_eq!(Value::Int64(2).total_cmp(&Value::Float64(2.0)), Ordering::Equal);
        assert_eq!(Value::Null.total_cmp(&Value::Int64(0)), Ordering::Less);
        assert_eq!(
            Value::Utf8("friday".into()).total_cmp(&Value::Utf8("monday".into())),
            Ordering::Less
        );
    }

    #[test]
    fn row_key_treats_equal_rows_as_duplicates() {
        let a = vec![Value::Float64(780.0), Value::Utf8("Customer".into())];
        let b = vec![Value::Float64(780.0), Value::Utf8("Customer".into())];
        let c = vec![Value::Float64(750.0), Value::Utf8("Customer".into())];

        let mut seen = HashSet::new();
        assert!(seen.insert(RowKey(&a)));
        assert!(!seen.insert(RowKey(&b)));
        assert!(seen.insert(RowKey(&c)));
    }

    #[test]
    fn with_column_appends_then_replaces() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);

        let doubled = ds.with_column(Field::new("double", DataType::Int64), |row| match row[0] {
            Value::Int64(v) => Value::Int64(v * 2),
            _ => Value::Null,
        });
        assert_eq!(doubled.schema.index_of("double"), Some(1));
        assert_eq!(doubled.rows[1], vec![Value::Int64(2), Value::Int64(4)]);

        let replaced = doubled.with_column(Field::new("double", DataType::Int64), |_| Value::Null);
        assert_eq!(replaced.schema.fields.len(), 2);
        assert_eq!(replaced.rows[0], vec![Value::Int64(1), Value::Null]);
    }

    #[test]
    fn column_is_none_for_missing_field() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Int64(1)]]);
        assert!(ds.column("Gender").is_none());
        assert_eq!(ds.column("n").unwrap().count(), 1);
    }
}
