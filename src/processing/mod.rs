//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every operation returns a new dataset; inputs are never modified.
//!
//! Currently implemented:
//!
//! - [`filter()`], [`drop_duplicates()`], [`drop_nulls()`]: row removal
//! - [`map()`], [`fill_null()`]: row mapping
//! - [`reduce()`]: common reductions (count/sum/min/max/mean/std)
//! - [`value_counts()`], [`most_frequent()`], [`mode()`]: frequency tables with sorted keys
//!
//! ## Example: filter → fill → reduce
//!
//! ```rust
//! use rust_data_exercises::processing::{fill_null, filter, reduce, value_counts, ReduceOp};
//! use rust_data_exercises::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("Trip Duration", DataType::Float64),
//!     Field::new("User Type", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(780.0), Value::Utf8("Customer".into())],
//!         vec![Value::Float64(-5.0), Value::Utf8("Customer".into())],
//!         vec![Value::Float64(750.0), Value::Null],
//!     ],
//! );
//!
//! // Keep only positive durations.
//! let idx = ds.schema.index_of("Trip Duration").unwrap();
//! let positive = filter(&ds, |row| row[idx].as_f64().is_some_and(|d| d > 0.0));
//!
//! // Fill unknown rider types.
//! let (filled, n) = fill_null(&positive, "User Type", &Value::Utf8("Unknown".into())).unwrap();
//! assert_eq!(n, 1);
//!
//! assert_eq!(reduce(&filled, "Trip Duration", ReduceOp::Sum), Some(Value::Float64(1530.0)));
//! assert_eq!(value_counts(&filled, "User Type").unwrap().len(), 2);
//! ```

pub mod filter;
pub mod group;
pub mod map;
pub mod reduce;

pub use filter::{drop_duplicates, drop_nulls, filter};
pub use group::{count_sorted, mode, most_frequent, value_counts, ValueCounts};
pub use map::{fill_null, map};
pub use reduce::{reduce, ReduceOp};
