use rust_data_exercises::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader};
use rust_data_exercises::trips::{read_trips, trip_schema};
use rust_data_exercises::types::{DataType, Field, Schema, Value};

fn station_schema() -> Schema {
    Schema::new(vec![
        Field::new("Start Time", DataType::Timestamp),
        Field::new("Trip Duration", DataType::Float64),
        Field::new("Start Station", DataType::Utf8),
        Field::optional("Gender", DataType::Utf8),
    ])
}

#[test]
fn ingest_csv_from_path_reads_trip_fixture() {
    let mut rdr = csv::Reader::from_path("tests/fixtures/chicago.csv").unwrap();
    let ds = read_trips(&mut rdr).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec![
            "Id",
            "Start Time",
            "End Time",
            "Trip Duration",
            "Start Station",
            "End Station",
            "User Type",
            "Gender",
            "Birth Year",
            "Month",
            "Weekday",
            "Hour",
        ]
    );
    assert_eq!(ds.rows[0][0], Value::Int64(123));
    assert_eq!(ds.rows[0][3], Value::Float64(3831.35));
    assert_eq!(ds.rows[2][9], Value::Utf8("march".to_string()));
    assert_eq!(ds.rows[2][10], Value::Utf8("friday".to_string()));
    assert_eq!(ds.rows[2][11], Value::Int64(0));
}

#[test]
fn optional_columns_absent_from_file_are_dropped() {
    let ds = ingest_csv_from_path("tests/fixtures/washington.csv", &trip_schema()).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert!(ds.schema.index_of("Gender").is_none());
    assert!(ds.schema.index_of("Birth Year").is_none());
    // The unnamed index header does not match `Id` without `read_trips`.
    assert!(ds.schema.index_of("Id").is_none());
}

#[test]
fn ingest_csv_allows_reordered_columns() {
    let input = "Start Station,Gender,Trip Duration,Start Time\n\
                 Clark St,Female,600,2017-06-01 08:00:00\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &station_schema()).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert!(matches!(ds.rows[0][0], Value::Timestamp(_)));
    assert_eq!(ds.rows[0][1], Value::Float64(600.0));
    assert_eq!(ds.rows[0][2], Value::Utf8("Clark St".to_string()));
    assert_eq!(ds.rows[0][3], Value::Utf8("Female".to_string()));
}

#[test]
fn empty_cells_become_null() {
    let input = "Start Time,Trip Duration,Start Station,Gender\n2017-06-01 08:00:00,, ,\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &station_schema()).unwrap();
    assert_eq!(ds.rows[0][1..], [Value::Null, Value::Null, Value::Null]);
}

#[test]
fn ingest_csv_errors_on_missing_required_column() {
    let input = "Start Time,Start Station\n2017-06-01 08:00:00,Clark St\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &station_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'Trip Duration'"));
}

#[test]
fn ingest_csv_errors_on_type_parse() {
    let input = "Start Time,Trip Duration,Start Station\n\
                 2017-06-01 08:00:00,ten minutes,Clark St\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &station_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value at row 2"));
    assert!(msg.contains("column 'Trip Duration'"));
}

#[test]
fn ingest_csv_errors_on_bad_timestamp() {
    let err =
        ingest_csv_from_path("tests/fixtures/broken/chicago.csv", &trip_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 3"));
    assert!(msg.contains("column 'Start Time'"));
    assert!(msg.contains("raw='not a timestamp'"));
}

#[test]
fn ingest_csv_from_path_missing_file_is_io_error() {
    let err =
        ingest_csv_from_path("tests/fixtures/does_not_exist.csv", &trip_schema()).unwrap_err();
    assert!(err.to_string().starts_with("csv error"));
}
