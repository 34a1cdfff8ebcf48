use crate::error::Result;
use crate::structs::ClimateRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::{fs::File, io::Read, path::Path};

/// Number of leading fields every data row must carry.
const FIELD_COUNT: usize = 6;

/// Reads climate records from a CSV file.
///
/// # Arguments
/// * `input_path` - Path of the CSV file, header line first
///
/// # Returns
/// Returns the well-formed records in file order.
///
/// # Errors
/// Returns error if the file cannot be opened or read.
pub fn load_records(input_path: &Path) -> Result<Vec<ClimateRecord>> {
    debug!("Reading CSV file: {}", input_path.display());
    let file = File::open(input_path)?;
    read_records(file)
}

/// Reads climate records from any CSV source.
///
/// The first line is a header. Columns are, in order: date, precipitation,
/// max temperature, min temperature, humidity and wind. Rows with fewer
/// than six fields, or with a non-numeric measurement, are skipped; extra
/// trailing fields are ignored.
///
/// # Errors
/// Returns error if the underlying reader fails.
pub fn read_records<R: Read>(source: R) -> Result<Vec<ClimateRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        match parse_row(&row) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!("Skipping malformed row {}: {:?}", index + 1, row);
            }
        }
    }

    info!("Loaded {} records ({} skipped)", records.len(), skipped);
    Ok(records)
}

fn parse_row(row: &StringRecord) -> Option<ClimateRecord> {
    if row.len() < FIELD_COUNT {
        return None;
    }
    let number = |i: usize| row.get(i)?.parse::<f64>().ok();

    Some(ClimateRecord {
        date: row.get(0)?.to_string(),
        precipitation: number(1)?,
        temp_max: number(2)?,
        temp_min: number(3)?,
        humidity: number(4)?,
        wind: number(5)?,
    })
}
