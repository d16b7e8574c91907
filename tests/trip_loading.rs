use rust_data_exercises::trips::{
    apply_filters, load_data, City, DayFilter, LoadOptions, MonthFilter,
};
use rust_data_exercises::types::Value;

fn load(city: City, month: &str, day: &str) -> usize {
    let opts = LoadOptions {
        data_dir: "tests/fixtures".into(),
        month: month.parse().unwrap(),
        weekday: day.parse().unwrap(),
        ..Default::default()
    };
    load_data(city, &opts).unwrap().row_count()
}

#[test]
fn load_data_applies_month_and_day_filters() {
    assert_eq!(load(City::Chicago, "all", "all"), 3);
    assert_eq!(load(City::Washington, "january", "all"), 2);
    assert_eq!(load(City::NewYorkCity, "all", "monday"), 1);
    assert_eq!(load(City::Chicago, "march", "friday"), 1);
    assert_eq!(load(City::Washington, "march", "sunday"), 0);
}

#[test]
fn loaded_trips_carry_derived_columns() {
    let opts = LoadOptions {
        data_dir: "tests/fixtures".into(),
        ..Default::default()
    };
    let ds = load_data(City::Chicago, &opts).unwrap();

    for column in ["Id", "Month", "Weekday", "Hour", "Calculated Trip Duration"] {
        assert!(ds.schema.index_of(column).is_some(), "missing {column}");
    }
    let weekdays: Vec<&Value> = ds.column("Weekday").unwrap().collect();
    assert_eq!(
        weekdays,
        vec![
            &Value::Utf8("sunday".to_string()),
            &Value::Utf8("monday".to_string()),
            &Value::Utf8("friday".to_string()),
        ]
    );
    let hours: Vec<&Value> = ds.column("Hour").unwrap().collect();
    assert_eq!(hours, vec![&Value::Int64(9), &Value::Int64(9), &Value::Int64(0)]);
}

#[test]
fn washington_has_no_gender_or_birth_year() {
    let opts = LoadOptions {
        data_dir: "tests/fixtures".into(),
        ..Default::default()
    };
    let ds = load_data(City::Washington, &opts).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert!(ds.schema.index_of("Gender").is_none());
    assert!(ds.schema.index_of("Birth Year").is_none());
}

#[test]
fn filters_are_reapplicable_to_loaded_trips() {
    let opts = LoadOptions {
        data_dir: "tests/fixtures".into(),
        ..Default::default()
    };
    let all = load_data(City::NewYorkCity, &opts).unwrap();

    let january = apply_filters(&all, "January".parse::<MonthFilter>().unwrap(), DayFilter::All);
    assert_eq!(january.row_count(), 2);

    let none = apply_filters(&january, MonthFilter::All, "friday".parse().unwrap());
    assert!(none.is_empty());
}

#[test]
fn unknown_filter_values_are_rejected() {
    let err = "smarch".parse::<MonthFilter>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid month 'smarch' (expected all, january, february, ... , december)"
    );
    assert!("someday".parse::<DayFilter>().is_err());
}
