//! Explore US bikeshare data: load a city's trips, clean them, and print statistics.
//!
//! Usage:
//! ```text
//! cargo run --bin bikeshare -- --city chicago --month march --day friday --data-dir data
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rust_data_exercises::cleaning::CleaningOptions;
use rust_data_exercises::ingestion::TracingObserver;
use rust_data_exercises::report::{
    station_stats, time_stats, trip_duration_stats, user_stats, Report, Section,
};
use rust_data_exercises::trips::{load_data, City, DayFilter, LoadOptions, MonthFilter};
use rust_data_exercises::types::DataSet;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Let's explore some US bikeshare data!")]
struct Args {
    /// City to analyze (chicago, new york city, washington)
    #[arg(short, long, default_value = "chicago")]
    city: City,

    /// Month to filter by, or "all"
    #[arg(short, long, default_value = "all")]
    month: MonthFilter,

    /// Weekday to filter by, or "all"
    #[arg(short, long, default_value = "all")]
    day: DayFilter,

    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// JSON file overriding cleaning thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn read_cleaning_options(path: &Path) -> Result<CleaningOptions> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

fn print_section<T: Section>(trips: &DataSet, reporter: fn(&DataSet) -> Report<T>) {
    let start = Instant::now();
    let report = reporter(trips);

    println!("\n{}\n", report.heading());
    println!("{report}");
    println!("\nThis took {:?}.", start.elapsed());
    println!("{}", "-".repeat(40));
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let cleaning = match &args.config {
        Some(path) => read_cleaning_options(path)?,
        None => CleaningOptions::default(),
    };

    println!("Hello! Let's explore some bikeshare data!");
    println!("city={} month={} day={}", args.city, args.month, args.day);
    println!("{}", "-".repeat(40));

    let options = LoadOptions {
        data_dir: args.data_dir,
        month: args.month,
        weekday: args.day,
        cleaning,
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    let trips = load_data(args.city, &options)
        .with_context(|| format!("loading {} trips", args.city))?;
    println!("> {} rows left after cleaning/filtering.", trips.row_count());

    print_section(&trips, time_stats);
    print_section(&trips, station_stats);
    print_section(&trips, trip_duration_stats);
    print_section(&trips, user_stats);
    Ok(())
}
