//! Descriptive statistics over a cleaned trip [`DataSet`].
//!
//! Each reporter is a read-only pass returning a [`Report`]. An empty dataset yields
//! [`Report::NoData`], which renders a notice instead of statistics. Rendering is done by
//! [`Report::lines`] (or `Display`, which joins the lines).
//!
//! "Most frequent" values come from frequency tables sorted by key, so ties resolve to the
//! smallest key.

use std::fmt;

use crate::processing::{
    count_sorted, mode, most_frequent, reduce, value_counts, ReduceOp, ValueCounts,
};
use crate::trips::columns::{
    BIRTH_YEAR, DURATION, END_STATION, GENDER, HOUR, MONTH, START_STATION, USER_TYPE, WEEKDAY,
};
use crate::types::{DataSet, Value};

/// Renderable body of a report.
pub trait Section {
    /// Heading printed before the section.
    const HEADING: &'static str;
    /// Noun used in the no-data notice, e.g. `time`.
    const TOPIC: &'static str;

    fn lines(&self) -> Vec<String>;
}

/// Result of a reporter.
#[derive(Debug, Clone, PartialEq)]
pub enum Report<T> {
    /// The dataset had no rows.
    NoData,
    Ready(T),
}

impl<T: Section> Report<T> {
    pub fn heading(&self) -> &'static str {
        T::HEADING
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Report::NoData => vec![format!(
                "/!\\ No data available to display {} statistics.",
                T::TOPIC
            )],
            Report::Ready(body) => body.lines(),
        }
    }
}

impl<T: Section> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// A value with its number of occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    pub value: Value,
    pub count: usize,
}

/// Month/weekday summary: either the only value present (a filter is in effect) or the
/// most common one.
#[derive(Debug, Clone, PartialEq)]
pub enum Period {
    Filtered(Value),
    MostCommon(Frequency),
}

fn top(counts: &ValueCounts) -> Option<Frequency> {
    most_frequent(counts).map(|(value, count)| Frequency {
        value: value.clone(),
        count,
    })
}

fn top_of(dataset: &DataSet, column: &str) -> Option<Frequency> {
    top(&value_counts(dataset, column)?)
}

fn period(dataset: &DataSet, column: &str) -> Option<Period> {
    let counts = value_counts(dataset, column)?;
    if let [(only, _)] = counts.as_slice() {
        return Some(Period::Filtered(only.clone()));
    }
    top(&counts).map(Period::MostCommon)
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Format with two decimals and `,` thousands separators, e.g. `5,361.35`.
pub fn with_thousands(v: f64) -> String {
    let formatted = format!("{:.2}", v.abs());
    let (int, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Most frequent month, weekday, and start hour.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<Period>,
    pub weekday: Option<Period>,
    pub hour: Option<Frequency>,
}

impl Section for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";
    const TOPIC: &'static str = "time";

    fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (label, period) in [("month", &self.month), ("weekday", &self.weekday)] {
            match period {
                Some(Period::Filtered(v)) => {
                    out.push(format!("Filter set to {}", capitalize(&v.to_string())))
                }
                Some(Period::MostCommon(f)) => out.push(format!(
                    "The most common {label} is {}, with {} occurrences.",
                    capitalize(&f.value.to_string()),
                    f.count
                )),
                None => {}
            }
        }
        if let Some(f) = &self.hour {
            let hour = f.value.as_f64().map_or_else(|| f.value.to_string(), |h| format!("{h:.0}"));
            out.push(format!(
                "The most common start hour is {hour}h, with {} occurrences.",
                f.count
            ));
        }
        out
    }
}

/// Statistics on the most frequent times of travel.
pub fn time_stats(dataset: &DataSet) -> Report<TimeStats> {
    if dataset.is_empty() {
        return Report::NoData;
    }
    Report::Ready(TimeStats {
        month: period(dataset, MONTH),
        weekday: period(dataset, WEEKDAY),
        hour: top_of(dataset, HOUR),
    })
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: Option<Frequency>,
    pub end: Option<Frequency>,
    /// Keyed by `"<start> --> <end>"`.
    pub trip: Option<Frequency>,
}

impl Section for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";
    const TOPIC: &'static str = "station";

    fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(f) = &self.start {
            out.push(format!(
                "The most commonly used start station is {}, with {} occurrences.",
                f.value, f.count
            ));
        }
        if let Some(f) = &self.end {
            out.push(format!(
                "The most commonly used end station is {}, with {} occurrences.",
                f.value, f.count
            ));
        }
        if let Some(f) = &self.trip {
            out.push(format!(
                "The most common trip is: {}, with {} occurrences.",
                f.value, f.count
            ));
        }
        out
    }
}

/// Statistics on the most popular stations and trip.
pub fn station_stats(dataset: &DataSet) -> Report<StationStats> {
    if dataset.is_empty() {
        return Report::NoData;
    }

    let trip = match (
        dataset.schema.index_of(START_STATION),
        dataset.schema.index_of(END_STATION),
    ) {
        (Some(s), Some(e)) => {
            let trips = dataset.rows.iter().filter_map(|row| match (&row[s], &row[e]) {
                (Value::Utf8(a), Value::Utf8(b)) => Some(Value::Utf8(format!("{a} --> {b}"))),
                _ => None,
            });
            top(&count_sorted(trips))
        }
        _ => None,
    };

    Report::Ready(StationStats {
        start: top_of(dataset, START_STATION),
        end: top_of(dataset, END_STATION),
        trip,
    })
}

/// Total and mean stored trip duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: f64,
}

impl Section for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";
    const TOPIC: &'static str = "duration";

    fn lines(&self) -> Vec<String> {
        let (t, m) = (self.total, self.mean);
        vec![
            format!(
                "Total travel time : {}sec = {}min = {}h = {} days",
                with_thousands(t),
                with_thousands(t / 60.0),
                with_thousands(t / 3600.0),
                with_thousands(t / 86400.0)
            ),
            format!(
                "Mean travel time : {}sec = {}min = {}h",
                with_thousands(m),
                with_thousands(m / 60.0),
                with_thousands(m / 3600.0)
            ),
        ]
    }
}

/// Statistics on total and average trip duration.
///
/// A dataset without any stored duration is reported as having no data.
pub fn trip_duration_stats(dataset: &DataSet) -> Report<DurationStats> {
    let total = reduce(dataset, DURATION, ReduceOp::Sum).and_then(|v| v.as_f64());
    let mean = reduce(dataset, DURATION, ReduceOp::Mean).and_then(|v| v.as_f64());
    match (total, mean) {
        (Some(total), Some(mean)) if !dataset.is_empty() => {
            Report::Ready(DurationStats { total, mean })
        }
        _ => Report::NoData,
    }
}

/// Earliest, most recent, and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthYears {
    pub earliest: f64,
    pub latest: f64,
    pub most_common: f64,
}

/// Rider breakdown. `None` fields mean the city has no such column.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Option<ValueCounts>,
    pub genders: Option<ValueCounts>,
    pub birth_years: Option<BirthYears>,
}

/// Render a frequency table: a title line, then keys left-aligned and counts right-aligned.
fn table(title: &str, counts: &ValueCounts) -> Vec<String> {
    let keys: Vec<String> = counts.iter().map(|(k, _)| k.to_string()).collect();
    let key_width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
    let count_width = counts.iter().map(|(_, n)| n.to_string().len()).max().unwrap_or(0);

    let mut out = vec![title.to_string()];
    for (key, (_, n)) in keys.iter().zip(counts) {
        out.push(format!("{key:<key_width$}    {n:>count_width$}"));
    }
    out
}

impl Section for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";
    const TOPIC: &'static str = "user";

    fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(counts) = &self.user_types {
            out.extend(table(USER_TYPE, counts));
            out.push(String::new());
        }
        match &self.genders {
            Some(counts) => {
                out.extend(table(GENDER, counts));
                out.push(String::new());
            }
            None => out.push("No gender data available for this city.".to_string()),
        }
        match &self.birth_years {
            Some(b) => {
                out.push(format!("Earliest year of birth: {:.0}", b.earliest));
                out.push(format!("Most recent year of birth: {:.0}", b.latest));
                out.push(format!("Most common year of birth: {:.0}", b.most_common));
            }
            None => out.push("No data on dates of birth available for this city.".to_string()),
        }
        out
    }
}

/// Statistics on bikeshare users.
pub fn user_stats(dataset: &DataSet) -> Report<UserStats> {
    if dataset.is_empty() {
        return Report::NoData;
    }

    let numeric = |op| reduce(dataset, BIRTH_YEAR, op).and_then(|v| v.as_f64());
    let birth_years = match (
        numeric(ReduceOp::Min),
        numeric(ReduceOp::Max),
        mode(dataset, BIRTH_YEAR).and_then(|v| v.as_f64()),
    ) {
        (Some(earliest), Some(latest), Some(most_common)) => Some(BirthYears {
            earliest,
            latest,
            most_common,
        }),
        _ => None,
    };

    Report::Ready(UserStats {
        user_types: value_counts(dataset, USER_TYPE),
        genders: value_counts(dataset, GENDER),
        birth_years,
    })
}

#[cfg(test)]
mod tests {
    use super::{capitalize, with_thousands};

    #[test]
    fn thousands_separator_and_rounding() {
        assert_eq!(with_thousands(5361.35), "5,361.35");
        assert_eq!(with_thousands(1787.116_666), "1,787.12");
        assert_eq!(with_thousands(0.062_052), "0.06");
        assert_eq!(with_thousands(1_234_567.0), "1,234,567.00");
        assert_eq!(with_thousands(-1500.5), "-1,500.50");
        assert_eq!(with_thousands(-0.001), "0.00");
    }

    #[test]
    fn capitalize_like_titles() {
        assert_eq!(capitalize("january"), "January");
        assert_eq!(capitalize("WEDNESDAY"), "Wednesday");
        assert_eq!(capitalize(""), "");
    }
}
