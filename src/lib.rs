//! `rust-data-exercises` holds two small, independent batch pipelines:
//!
//! - [`sequence`]: a divisor-rule sequence generator (FizzBuzz with custom rules).
//! - Bikeshare trip analysis: [`trips`] loads a city's CSV file into an in-memory
//!   [`types::DataSet`], [`cleaning`] removes bad rows, and [`report`] computes descriptive
//!   statistics.
//!
//! ## Trip pipeline
//!
//! [`trips::load_data`] reads `<data_dir>/<city>.csv` using [`trips::trip_schema`], derives
//! `Month` / `Weekday` / `Hour` from `Start Time`, runs [`cleaning::clean`], then applies the
//! month and weekday filters. Optional columns (`Gender`, `Birth Year`) that a city does not
//! provide are simply absent from the resulting schema; reporters check for them with
//! [`types::Schema::index_of`].
//!
//! ```no_run
//! use rust_data_exercises::report::{station_stats, time_stats, trip_duration_stats, user_stats};
//! use rust_data_exercises::trips::{load_data, City, LoadOptions};
//!
//! # fn main() -> Result<(), rust_data_exercises::IngestionError> {
//! let trips = load_data(City::Washington, &LoadOptions::default())?;
//! println!("{}", time_stats(&trips));
//! println!("{}", station_stats(&trips));
//! println!("{}", trip_duration_stats(&trips));
//! println!("{}", user_stats(&trips));
//! # Ok(())
//! # }
//! ```
//!
//! ## Cleaning passes
//!
//! Applied once per load, in order; each pass logs how many rows it removed:
//!
//! 1. exact duplicate rows
//! 2. rows missing start time, end time, or stored duration
//! 3. missing `User Type` / `Gender` filled with `"Unknown"`
//! 4. stored durations outside mean ± 3 standard deviations
//! 5. non-positive stored durations
//! 6. non-positive durations recomputed from the timestamps
//! 7. stored vs. recomputed durations differing by more than 1% **and** more than 300 seconds
//!
//! ## Sequence example
//!
//! ```rust
//! use rust_data_exercises::sequence::{RuleSet, SequenceGenerator};
//!
//! let fizzbuzz = SequenceGenerator::new(15, RuleSet::default());
//! let last = fizzbuzz.iter().last().unwrap();
//! assert_eq!(last, "FizzBuzz");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: schema-driven CSV reader and load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: in-memory dataset transformations (filter/map/reduce/value counts)
//! - [`cleaning`], [`trips`], [`report`]: the bikeshare pipeline
//! - [`sequence`]: the rule-based sequence generator
//! - [`error`]: error types

pub mod cleaning;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod sequence;
pub mod trips;
pub mod types;

pub use error::{IngestionError, IngestionResult, SequenceError, SequenceResult};
