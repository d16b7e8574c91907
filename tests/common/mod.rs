#![allow(dead_code)]

use rust_data_exercises::trips::read_trips;
use rust_data_exercises::types::{DataSet, Value};

/// Three consistent trips: two in January (Sunday, Monday) and one in March (Friday).
pub const MOCK_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
123,2017-01-01 09:13:21,2017-01-01 10:17:12,3831.35,Wood St & Hubbard St,Larrabee St & Kingsbury St,Subscriber,Male,1990
456545,2017-01-02 09:07:57,2017-01-02 09:20:53,780,May St & Taylor St,St. Louis Ave & Balmoral Ave,Customer,Female,1990
15987,2017-03-03 00:08:20,2017-03-03 00:20:53,750,May St & Taylor St,St. Louis Ave & Balmoral Ave,Customer,Male,2001
";

pub fn mock_trips() -> DataSet {
    let mut rdr = csv::Reader::from_reader(MOCK_CSV.as_bytes());
    read_trips(&mut rdr).unwrap()
}

/// Overwrite one cell, like `df.loc[row, column] = value`.
pub fn set(ds: &mut DataSet, row: usize, column: &str, value: Value) {
    let idx = ds
        .schema
        .index_of(column)
        .unwrap_or_else(|| panic!("no column {column}"));
    ds.rows[row][idx] = value;
}

/// Drop one column, like `df.drop(columns=[column])`.
pub fn without_column(ds: &DataSet, column: &str) -> DataSet {
    let idx = ds.schema.index_of(column).unwrap();
    let mut out = ds.clone();
    out.schema.fields.remove(idx);
    for row in &mut out.rows {
        row.remove(idx);
    }
    out
}

pub fn ts(s: &str) -> Value {
    Value::Timestamp(chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
}
