//! Custom FizzBuzz-style sequence generator.
//!
//! Usage:
//! ```text
//! cargo run --bin sequence -- 15
//! cargo run --bin sequence -- 30 --rules 3:Fizz 5:Buzz 7:Bazz
//! cargo run --bin sequence -- 30 --rules-file rules.json
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rust_data_exercises::sequence::{parse_upper_bound, RuleSet, SequenceGenerator};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Custom FizzBuzz sequence generator")]
struct Args {
    /// Sequence upper bound (positive integer)
    #[arg(value_parser = parse_upper_bound, allow_negative_numbers = true)]
    n: u64,

    /// Custom rules as 'divisor:label' (e.g. --rules 3:Fizz 5:Buzz)
    #[arg(long, num_args = 1..)]
    rules: Vec<String>,

    /// JSON file holding an array of {"divisor": n, "label": "..."} rules
    #[arg(long, conflicts_with = "rules")]
    rules_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    // Every rule is parsed before anything is printed.
    let rules = match (&args.rules_file, args.rules.is_empty()) {
        (Some(path), _) => RuleSet::from_json_path(path)?,
        (None, false) => RuleSet::parse(&args.rules)?,
        (None, true) => RuleSet::default(),
    };
    tracing::debug!(n = args.n, rules = rules.len(), "generating sequence");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for value in &SequenceGenerator::new(args.n, rules) {
        writeln!(out, "{value}")?;
    }
    out.flush()?;
    Ok(())
}
