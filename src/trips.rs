//! Bikeshare trip loading.
//!
//! [`load_data`] is the main entrypoint: it reads a [`City`]'s CSV file with the trip
//! schema, derives the calendar columns, runs [`crate::cleaning::clean`], applies the month
//! and weekday filters, and reports the outcome to an optional observer.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, Month, Timelike, Weekday};
use thiserror::Error;

use crate::cleaning::{clean, CleaningOptions};
use crate::error::IngestionResult;
use crate::ingestion::csv::ingest_csv_from_reader;
use crate::ingestion::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Column names of the trip dataset.
pub mod columns {
    /// The unnamed leading index column, renamed on load.
    pub const ID: &str = "Id";
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    // Derived at load time from `Start Time`.
    pub const MONTH: &str = "Month";
    pub const WEEKDAY: &str = "Weekday";
    pub const HOUR: &str = "Hour";

    /// Added by the cleaner: `End Time - Start Time` in seconds.
    pub const CALCULATED_DURATION: &str = "Calculated Trip Duration";
}

use columns::*;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase full month name, as stored in the `Month` column.
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

/// Lowercase full weekday name, as stored in the `Weekday` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// Cities with a backing data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase display name, e.g. `new york city`.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Data file name relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a city or filter value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{raw}' (expected {expected})")]
pub struct ParseFilterError {
    kind: &'static str,
    raw: String,
    expected: &'static str,
}

impl FromStr for City {
    type Err = ParseFilterError;

    /// Accepts the display name or the file stem, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', " ");
        City::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| ParseFilterError {
                kind: "city",
                raw: s.to_string(),
                expected: "chicago, new york city, washington",
            })
    }
}

/// Month filter; `all` disables filtering. Months are parsed by full name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn matches(&self, month: &str) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => month.eq_ignore_ascii_case(month_name(*m)),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .into_iter()
            .find(|m| month_name(*m).eq_ignore_ascii_case(s))
            .map(MonthFilter::Only)
            .ok_or_else(|| ParseFilterError {
                kind: "month",
                raw: s.to_string(),
                expected: "all, january, february, ... , december",
            })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(month_name(*m)),
        }
    }
}

/// Weekday filter; `all` disables filtering. Weekdays are parsed by full name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(&self, weekday: &str) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => weekday.eq_ignore_ascii_case(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
            .map(DayFilter::Only)
            .ok_or_else(|| ParseFilterError {
                kind: "weekday",
                raw: s.to_string(),
                expected: "all, monday, tuesday, ... , sunday",
            })
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// Options controlling [`load_data`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Directory holding the city CSV files.
    pub data_dir: PathBuf,
    pub month: MonthFilter,
    pub weekday: DayFilter,
    pub cleaning: CleaningOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("data_dir", &self.data_dir)
            .field("month", &self.month)
            .field("weekday", &self.weekday)
            .field("cleaning", &self.cleaning)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            month: MonthFilter::All,
            weekday: DayFilter::All,
            cleaning: CleaningOptions::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Schema of a city trip file. `Id`, `Gender` and `Birth Year` are optional.
pub fn trip_schema() -> Schema {
    Schema::new(vec![
        Field::optional(ID, DataType::Int64),
        Field::new(START_TIME, DataType::Timestamp),
        Field::new(END_TIME, DataType::Timestamp),
        Field::new(DURATION, DataType::Float64),
        Field::new(START_STATION, DataType::Utf8),
        Field::new(END_STATION, DataType::Utf8),
        Field::new(USER_TYPE, DataType::Utf8),
        Field::optional(GENDER, DataType::Utf8),
        Field::optional(BIRTH_YEAR, DataType::Float64),
    ])
}

/// Load, clean, and filter the trips of `city`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row counts after reading, cleaning, and filtering
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_exercises::ingestion::TracingObserver;
/// use rust_data_exercises::trips::{load_data, City, LoadOptions};
///
/// # fn main() -> Result<(), rust_data_exercises::IngestionError> {
/// let opts = LoadOptions {
///     data_dir: "data".into(),
///     month: "march".parse().unwrap(),
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let trips = load_data(City::Chicago, &opts)?;
/// println!("rows={}", trips.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_data(city: City, options: &LoadOptions) -> IngestionResult<DataSet> {
    let path = options.data_dir.join(city.file_name());
    let ctx = IngestionContext {
        path: path.clone(),
        city,
    };

    let result = load_path(&path, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((_, stats)) => obs.on_success(&ctx, *stats),
            Err(e) => {
                let sev = IngestionSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(ds, _)| ds)
}

fn load_path(path: &Path, options: &LoadOptions) -> IngestionResult<(DataSet, IngestionStats)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_from_reader(&mut rdr, options)
}

/// Same pipeline as [`load_data`], reading from an existing CSV reader.
pub fn load_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    options: &LoadOptions,
) -> IngestionResult<(DataSet, IngestionStats)> {
    let raw = read_trips(rdr)?;
    let rows_read = raw.row_count();

    let (cleaned, _report) = clean(&raw, &options.cleaning)?;
    let rows_cleaned = cleaned.row_count();

    let filtered = apply_filters(&cleaned, options.month, options.weekday);
    tracing::info!(rows = filtered.row_count(), "rows left after cleaning/filtering");

    let stats = IngestionStats {
        rows_read,
        rows_cleaned,
        rows: filtered.row_count(),
    };
    Ok((filtered, stats))
}

/// Read raw trips with the [`trip_schema`] and derive the calendar columns.
///
/// An empty first header (the unnamed index column) is read as `Id`.
pub fn read_trips<R: Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.get(0).is_some_and(|h| h.trim().is_empty()) {
        let renamed: csv::StringRecord = headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { ID } else { h })
            .collect();
        rdr.set_headers(renamed);
    }

    let ds = ingest_csv_from_reader(rdr, &trip_schema())?;
    Ok(with_calendar_columns(&ds))
}

/// Append `Month`, `Weekday` and `Hour` derived from `Start Time`.
///
/// Rows without a start time get nulls; datasets without the column are returned unchanged.
pub fn with_calendar_columns(dataset: &DataSet) -> DataSet {
    let Some(start_idx) = dataset.schema.index_of(START_TIME) else {
        return dataset.clone();
    };
    let start = move |row: &[Value]| row.get(start_idx).and_then(Value::as_timestamp);

    dataset
        .with_column(Field::new(MONTH, DataType::Utf8), |row| {
            start(row).map_or(Value::Null, |ts| {
                Value::Utf8(MONTH_NAMES[ts.month0() as usize].to_string())
            })
        })
        .with_column(Field::new(WEEKDAY, DataType::Utf8), |row| {
            start(row).map_or(Value::Null, |ts| {
                Value::Utf8(weekday_name(ts.weekday()).to_string())
            })
        })
        .with_column(Field::new(HOUR, DataType::Int64), |row| {
            start(row).map_or(Value::Null, |ts| Value::Int64(i64::from(ts.hour())))
        })
}

/// Keep rows whose derived `Month`/`Weekday` match the filters (case-insensitive).
pub fn apply_filters(dataset: &DataSet, month: MonthFilter, weekday: DayFilter) -> DataSet {
    let month_idx = dataset.schema.index_of(MONTH);
    let weekday_idx = dataset.schema.index_of(WEEKDAY);

    dataset.filter_rows(|row| {
        let text = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(Value::as_str);
        (month == MonthFilter::All || text(month_idx).is_some_and(|m| month.matches(m)))
            && (weekday == DayFilter::All || text(weekday_idx).is_some_and(|d| weekday.matches(d)))
    })
}
