//! Trip data cleaning pipeline.
//!
//! [`clean`] runs a fixed sequence of passes over a trip [`DataSet`]. Each pass works on the
//! output of the previous one and produces a new dataset; dropped rows are never restored.
//!
//! 1. drop exact duplicate rows
//! 2. drop rows missing `Start Time`, `End Time` or `Trip Duration`
//! 3. fill missing `User Type` (and `Gender`, when present) with `"Unknown"`
//! 4. drop `Trip Duration` outliers outside `mean ± k·std` of the current rows
//! 5. drop non-positive `Trip Duration`
//! 6. recompute the duration from the timestamps and drop non-positive results
//! 7. drop rows whose stored and recomputed durations disagree beyond both tolerances

use std::fmt;

use serde::Deserialize;

use crate::error::{IngestionError, IngestionResult};
use crate::processing::{drop_duplicates, drop_nulls, fill_null, filter, reduce, ReduceOp};
use crate::trips::columns::{
    CALCULATED_DURATION, DURATION, END_TIME, GENDER, START_TIME, USER_TYPE,
};
use crate::types::{DataSet, DataType, Field, Value};

/// Placeholder written into missing categorical cells.
pub const UNKNOWN: &str = "Unknown";

/// Thresholds used by the cleaning passes.
///
/// Deserializable so a partial JSON config can override individual values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Rows further than this many standard deviations from the mean duration are outliers.
    pub outlier_std_devs: f64,
    /// Relative tolerance, as a fraction of the smaller of the two durations.
    pub relative_tolerance: f64,
    /// Absolute tolerance in seconds.
    pub absolute_tolerance_secs: f64,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            outlier_std_devs: 3.0,
            relative_tolerance: 0.01,
            absolute_tolerance_secs: 300.0,
        }
    }
}

/// A single pass of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningStep {
    Duplicates,
    MissingRequired,
    FillUnknown,
    DurationOutliers,
    NonPositiveDuration,
    NonPositiveCalculatedDuration,
    InconsistentDuration,
}

impl fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CleaningStep::Duplicates => "duplicate rows",
            CleaningStep::MissingRequired => "rows missing start/end time or duration",
            CleaningStep::FillUnknown => "missing categorical values filled",
            CleaningStep::DurationOutliers => "trip duration outliers",
            CleaningStep::NonPositiveDuration => "non-positive trip durations",
            CleaningStep::NonPositiveCalculatedDuration => "non-positive calculated trip durations",
            CleaningStep::InconsistentDuration => "inconsistent trip durations",
        })
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: CleaningStep,
    /// Rows dropped by the pass.
    pub removed: usize,
    /// Cells filled by the pass (only [`CleaningStep::FillUnknown`] fills).
    pub filled: usize,
}

/// Summary of a [`clean`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub steps: Vec<StepOutcome>,
}

impl CleaningReport {
    /// Rows dropped by `step` (zero if the step did not run).
    pub fn removed_by(&self, step: CleaningStep) -> usize {
        self.steps
            .iter()
            .filter(|o| o.step == step)
            .map(|o| o.removed)
            .sum()
    }

    pub fn total_removed(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

struct Recorder {
    steps: Vec<StepOutcome>,
}

impl Recorder {
    fn removed(&mut self, step: CleaningStep, before: &DataSet, after: &DataSet) {
        let removed = before.row_count() - after.row_count();
        tracing::info!(%step, removed, remaining = after.row_count(), "cleaning pass");
        self.steps.push(StepOutcome { step, removed, filled: 0 });
    }

    fn filled(&mut self, filled: usize) {
        let step = CleaningStep::FillUnknown;
        tracing::info!(%step, filled, "cleaning pass");
        self.steps.push(StepOutcome { step, removed: 0, filled });
    }
}

/// Run the cleaning pipeline over a trip dataset.
///
/// Requires the `Start Time`, `End Time` and `Trip Duration` columns. `User Type` and
/// `Gender` are filled only when present. The output carries an extra
/// `Calculated Trip Duration` column (seconds).
///
/// ```rust
/// use rust_data_exercises::cleaning::{clean, CleaningOptions};
/// use rust_data_exercises::ingestion::csv::ingest_csv_from_reader;
/// use rust_data_exercises::trips::trip_schema;
///
/// let input = "\
/// Start Time,End Time,Trip Duration,Start Station,End Station,User Type
/// 2017-01-02 09:07:57,2017-01-02 09:20:53,780,May St,Clark St,Customer
/// 2017-01-02 09:07:57,2017-01-02 09:20:53,780,May St,Clark St,Customer
/// 2017-01-03 10:00:00,2017-01-03 09:00:00,600,May St,Clark St,
/// ";
/// let mut rdr = csv::Reader::from_reader(input.as_bytes());
/// let trips = ingest_csv_from_reader(&mut rdr, &trip_schema()).unwrap();
///
/// let (cleaned, report) = clean(&trips, &CleaningOptions::default()).unwrap();
/// assert_eq!(cleaned.row_count(), 1);
/// assert_eq!(report.total_removed(), 2);
/// ```
pub fn clean(
    dataset: &DataSet,
    options: &CleaningOptions,
) -> IngestionResult<(DataSet, CleaningReport)> {
    let start_idx = require(dataset, START_TIME)?;
    let end_idx = require(dataset, END_TIME)?;
    let dur_idx = require(dataset, DURATION)?;

    let mut rec = Recorder { steps: Vec::new() };

    let ds = drop_duplicates(dataset);
    rec.removed(CleaningStep::Duplicates, dataset, &ds);

    let before = ds;
    let ds = drop_nulls(&before, &[START_TIME, END_TIME, DURATION]);
    rec.removed(CleaningStep::MissingRequired, &before, &ds);

    let ds = fill_unknown(ds, &mut rec);

    let before = ds;
    let ds = drop_outliers(&before, dur_idx, options.outlier_std_devs);
    rec.removed(CleaningStep::DurationOutliers, &before, &ds);

    let before = ds;
    let ds = filter(&before, |row| duration(row, dur_idx) > 0.0);
    rec.removed(CleaningStep::NonPositiveDuration, &before, &ds);

    // Re-cleaning replaces the column in place instead of appending a second one.
    let calc_idx = ds
        .schema
        .index_of(CALCULATED_DURATION)
        .unwrap_or(ds.schema.fields.len());
    let calculated = Field::new(CALCULATED_DURATION, DataType::Float64);
    let before = ds.with_column(calculated, |row| {
        match (row[start_idx].as_timestamp(), row[end_idx].as_timestamp()) {
            (Some(start), Some(end)) => {
                Value::Float64((end - start).num_milliseconds() as f64 / 1000.0)
            }
            _ => Value::Null,
        }
    });
    let ds = filter(&before, |row| duration(row, calc_idx) > 0.0);
    rec.removed(CleaningStep::NonPositiveCalculatedDuration, &before, &ds);

    let before = ds;
    let ds = filter(&before, |row| {
        consistent(duration(row, dur_idx), duration(row, calc_idx), options)
    });
    rec.removed(CleaningStep::InconsistentDuration, &before, &ds);

    let report = CleaningReport {
        rows_in: dataset.row_count(),
        rows_out: ds.row_count(),
        steps: rec.steps,
    };
    Ok((ds, report))
}

fn require(dataset: &DataSet, column: &str) -> IngestionResult<usize> {
    dataset
        .schema
        .index_of(column)
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("cleaning requires column '{column}'"),
        })
}

/// Numeric cell value; nulls read as NaN so every comparison against them is false.
fn duration(row: &[Value], idx: usize) -> f64 {
    row.get(idx).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

fn fill_unknown(ds: DataSet, rec: &mut Recorder) -> DataSet {
    let unknown = Value::Utf8(UNKNOWN.to_string());
    let mut filled = 0;
    let mut ds = ds;
    for column in [USER_TYPE, GENDER] {
        if let Some((out, n)) = fill_null(&ds, column, &unknown) {
            ds = out;
            filled += n;
        }
    }
    rec.filled(filled);
    ds
}

/// Mean and standard deviation come from the finite durations only.
fn drop_outliers(ds: &DataSet, dur_idx: usize, k: f64) -> DataSet {
    let column = &ds.schema.fields[dur_idx].name;
    let mean = reduce(ds, column, ReduceOp::Mean).and_then(|v| v.as_f64());
    let std = reduce(ds, column, ReduceOp::StdDev).and_then(|v| v.as_f64());
    let (Some(mean), Some(std)) = (mean, std) else {
        return ds.clone();
    };

    let lower = mean - std * k;
    let upper = mean + std * k;
    filter(ds, |row| {
        let d = duration(row, dur_idx);
        !(d < lower || d > upper)
    })
}

/// A pair is inconsistent only when the gap exceeds both the relative and absolute bound.
fn consistent(stored: f64, calculated: f64, options: &CleaningOptions) -> bool {
    let gap = (stored - calculated).abs();
    let relative = stored.min(calculated) * options.relative_tolerance;
    !(gap > relative && gap > options.absolute_tolerance_secs)
}

#[cfg(test)]
mod tests {
    use super::{consistent, CleaningOptions};

    #[test]
    fn inconsistency_needs_both_thresholds() {
        let opts = CleaningOptions::default();
        // 1169s gap, far above 1% and 300s.
        assert!(!consistent(5000.0, 3831.0, &opts));
        // 4s gap: under 300s.
        assert!(consistent(780.0, 776.0, &opts));
        // 400s gap on a 100_000s trip: above 300s but under 1%.
        assert!(consistent(100_000.0, 100_400.0, &opts));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: CleaningOptions = serde_json::from_str(r#"{"outlier_std_devs": 2.5}"#).unwrap();
        assert_eq!(opts.outlier_std_devs, 2.5);
        assert_eq!(opts.relative_tolerance, 0.01);
        assert_eq!(opts.absolute_tolerance_secs, 300.0);
    }
}
