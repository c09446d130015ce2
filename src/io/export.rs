//! Export batch predictions to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Input fields are echoed as read so failed rows can be fixed in place.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::io::batch::BatchOutcome;
use crate::predict::LocationMatch;
use crate::report::format_price;

pub const BATCH_OUTPUT_HEADER: [&str; 9] = [
    "line",
    "square_feet",
    "bhk",
    "bathrooms",
    "location",
    "price_inr",
    "price_display",
    "location_known",
    "error",
];

/// Write batch results to a CSV file.
pub fn write_batch_csv(path: &Path, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_batch(file, outcomes)
}

pub fn write_batch<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(writer);

    writer
        .write_record(BATCH_OUTPUT_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for outcome in outcomes {
        let [area, rooms, bathrooms, location] = &outcome.row.fields;
        let (price, display, known, error) = match &outcome.result {
            Ok(p) => (
                p.price.to_string(),
                format_price(p.price_i64()),
                (p.location == LocationMatch::Known).to_string(),
                String::new(),
            ),
            Err(message) => (String::new(), String::new(), String::new(), message.clone()),
        };

        let line = outcome.row.line.to_string();
        writer
            .write_record([
                line.as_str(),
                area.as_str(),
                rooms.as_str(),
                bathrooms.as_str(),
                location.as_str(),
                price.as_str(),
                display.as_str(),
                known.as_str(),
                error.as_str(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
