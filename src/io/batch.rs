//! Batch scoring of property lists.
//!
//! Reads a CSV of properties (`square_feet, bhk, bathrooms, location`, any
//! order, case-insensitive headers), validates every row, and prices the valid
//! ones in parallel against the published model.
//!
//! Row problems are reported per row and never fail the whole batch.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rayon::prelude::*;

use crate::data::loader::{COL_AREA, COL_BATHROOMS, COL_LOCATION, COL_ROOMS, build_header_map};
use crate::domain::PropertyInput;
use crate::error::{AppError, PredictError};
use crate::predict::{PricePredictor, Prediction};

/// Columns a batch file must have.
pub const BATCH_COLUMNS: [&str; 4] = [COL_AREA, COL_ROOMS, COL_BATHROOMS, COL_LOCATION];

/// One input row: the raw text (echoed in the output) and the parsed input.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub line: usize,
    pub fields: [String; 4],
    pub input: Result<PropertyInput, String>,
}

/// The scored counterpart of a `BatchRow`.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub row: BatchRow,
    pub result: Result<Prediction, String>,
}

pub fn read_batch(path: &Path, delimiter: u8) -> Result<Vec<BatchRow>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open batch CSV '{}': {e}", path.display())))?;
    read_batch_from(file, delimiter)
}

pub fn read_batch_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<BatchRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read batch CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let mut index = [0usize; 4];
    for (slot, name) in index.iter_mut().zip(BATCH_COLUMNS) {
        *slot = *header_map
            .get(name)
            .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))?;
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and records() is zero-based.
        let fallback_line = idx + 2;
        let row = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line() as usize);
                parse_batch_row(&record, &index, line)
            }
            Err(e) => BatchRow {
                line: fallback_line,
                fields: Default::default(),
                input: Err(format!("CSV parse error: {e}")),
            },
        };
        rows.push(row);
    }
    Ok(rows)
}

fn parse_batch_row(record: &StringRecord, index: &[usize; 4], line: usize) -> BatchRow {
    let fields = index.map(|i| record.get(i).map(str::trim).unwrap_or("").to_string());
    let input = parse_input(&fields);
    BatchRow { line, fields, input }
}

fn parse_input(fields: &[String; 4]) -> Result<PropertyInput, String> {
    let [area, rooms, bathrooms, location] = fields;
    let area = area
        .parse::<f64>()
        .map_err(|_| format!("invalid `{COL_AREA}` value '{area}'"))?;
    let rooms = rooms
        .parse::<u32>()
        .map_err(|_| format!("invalid `{COL_ROOMS}` value '{rooms}'"))?;
    let bathrooms = bathrooms
        .parse::<u32>()
        .map_err(|_| format!("invalid `{COL_BATHROOMS}` value '{bathrooms}'"))?;

    let input = PropertyInput::new(area, rooms, bathrooms, location.as_str());
    input.validate()?;
    Ok(input)
}

/// Price every valid row in parallel.
///
/// Fails up front with `ModelNotFitted` when nothing is published; after that,
/// each row succeeds or fails on its own.
pub fn score_batch(predictor: &PricePredictor, rows: Vec<BatchRow>) -> Result<Vec<BatchOutcome>, PredictError> {
    predictor.snapshot()?;

    let outcomes = rows
        .into_par_iter()
        .map(|row| {
            let result = match &row.input {
                Ok(input) => predictor.predict_price(input).map_err(|e| e.to_string()),
                Err(message) => Err(message.clone()),
            };
            BatchOutcome { row, result }
        })
        .collect();
    Ok(outcomes)
}
