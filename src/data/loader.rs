//! Dataset loading and location encoding.
//!
//! Turns the historical sales CSV into typed `Record`s plus the `LocationTable`
//! built during the same pass.
//!
//! Policies:
//! - **Header-driven schema**: required columns are found by case-insensitive
//!   name, in any order. Extra columns are ignored.
//! - **Short rows are skipped**: a row with too few fields to reach every
//!   required column is dropped and counted, not treated as an error.
//! - **Bad values fail fast**: an unparsable numeric field aborts the load,
//!   naming the offending line. Downstream code assumes numeric validity.
//!   A blank location is kept and encoded like any other name.
//! - Quoted fields may contain the delimiter.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{LocationTable, Record};
use crate::error::PredictError;

pub const COL_AREA: &str = "square_feet";
pub const COL_ROOMS: &str = "bhk";
pub const COL_BATHROOMS: &str = "bathrooms";
pub const COL_LOCATION: &str = "location";
pub const COL_PRICE: &str = "price_inr";

/// Required columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_AREA, COL_ROOMS, COL_BATHROOMS, COL_LOCATION, COL_PRICE];

/// Loader output.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub locations: LocationTable,
    /// Data rows seen after the header.
    pub rows_read: usize,
    /// Rows dropped for having too few fields.
    pub rows_skipped: usize,
}

/// Resolved positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    area: usize,
    rooms: usize,
    bathrooms: usize,
    location: usize,
    price: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, PredictError> {
        let header_map = build_header_map(headers);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !header_map.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::malformed(
                Some(1),
                format!(
                    "missing required column(s): {}. The header must contain: {}",
                    missing.join(", "),
                    REQUIRED_COLUMNS.join(", ")
                ),
            ));
        }

        Ok(Self {
            area: header_map[COL_AREA],
            rooms: header_map[COL_ROOMS],
            bathrooms: header_map[COL_BATHROOMS],
            location: header_map[COL_LOCATION],
            price: header_map[COL_PRICE],
        })
    }

    fn max(&self) -> usize {
        [self.area, self.rooms, self.bathrooms, self.location, self.price]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Load the dataset at `path`.
pub fn load_dataset(path: &Path, delimiter: u8) -> Result<Dataset, PredictError> {
    let file = File::open(path).map_err(|e| PredictError::DatasetIo {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_reader(file, delimiter)
}

/// Load a dataset from any reader (file, in-memory buffer, ...).
pub fn load_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, PredictError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| PredictError::malformed(Some(1), format!("failed to read header row: {e}")))?
        .clone();
    let columns = ColumnIndex::resolve(&headers)?;
    let min_fields = columns.max() + 1;

    let mut locations = LocationTable::new();
    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize);
            PredictError::malformed(line, format!("CSV parse error: {e}"))
        })?;
        rows_read += 1;

        if record.len() < min_fields {
            rows_skipped += 1;
            continue;
        }

        let line = record.position().map(|p| p.line() as usize);
        let row = parse_row(&record, &columns).map_err(|message| PredictError::malformed(line, message))?;
        let location_code = locations.intern(row.location);

        records.push(Record {
            area: row.area,
            rooms: row.rooms,
            bathrooms: row.bathrooms,
            location_code,
            price: row.price,
        });
    }

    if rows_skipped > 0 {
        log::warn!("Skipped {rows_skipped} of {rows_read} dataset rows with missing fields.");
    }

    Ok(Dataset {
        records,
        locations,
        rows_read,
        rows_skipped,
    })
}

/// A data row with every required field parsed, before location encoding.
struct RawRow<'a> {
    area: f64,
    rooms: u32,
    bathrooms: u32,
    location: &'a str,
    price: f64,
}

fn parse_row<'a>(record: &'a StringRecord, columns: &ColumnIndex) -> Result<RawRow<'a>, String> {
    let area = parse_f64(field(record, columns.area), COL_AREA)?;
    let rooms = parse_u32(field(record, columns.rooms), COL_ROOMS)?;
    let bathrooms = parse_u32(field(record, columns.bathrooms), COL_BATHROOMS)?;
    let location = field(record, columns.location);
    let price = parse_f64(field(record, columns.price), COL_PRICE)?;

    Ok(RawRow {
        area,
        rooms,
        bathrooms,
        location,
        price,
    })
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("invalid `{name}` value '{s}' (expected a decimal number)")),
    }
}

fn parse_u32(s: &str, name: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("invalid `{name}` value '{s}' (expected a whole number)"))
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn load(text: &str) -> Result<Dataset, PredictError> {
        load_from_reader(Cursor::new(text.as_bytes().to_vec()), b',')
    }

    #[test]
    fn parses_records_and_encodes_locations_in_first_seen_order() {
        let data = load(
            "square_feet,bhk,bathrooms,location,price_inr\n\
             1000,2,2,Pune,4500000\n\
             1500,3,2,Andheri,12000000\n\
             1200,2,1,Pune,5200000\n\
             900,1,1,Baner,3100000\n",
        )
        .unwrap();

        assert_eq!(data.records.len(), 4);
        assert_eq!(data.locations.names(), ["Pune", "Andheri", "Baner"]);
        let codes: Vec<usize> = data.records.iter().map(|r| r.location_code).collect();
        assert_eq!(codes, [0, 1, 0, 2]);
        assert_eq!(data.records[1].area, 1500.0);
        assert_eq!(data.records[1].rooms, 3);
        assert_eq!(data.records[1].price, 12_000_000.0);
    }

    #[test]
    fn header_order_and_case_do_not_matter() {
        let data = load(
            "\u{feff}Location,PRICE_INR, Bathrooms ,extra,BHK,Square_Feet\n\
             Delhi,8000000,2,x,3,1400\n",
        )
        .unwrap();
        let r = data.records[0];
        assert_eq!((r.area, r.rooms, r.bathrooms, r.price), (1400.0, 3, 2, 8_000_000.0));
        assert_eq!(data.locations.name(r.location_code), Some("Delhi"));
    }

    #[test]
    fn quoted_fields_may_contain_the_delimiter() {
        let data = load(
            "square_feet,bhk,bathrooms,location,price_inr\n\
             1000,2,2,\"Whitefield, Bangalore\",7000000\n\
             1100,2,2,\" Koramangala , Bangalore \",9000000\n",
        )
        .unwrap();
        assert_eq!(
            data.locations.names(),
            ["Whitefield, Bangalore", "Koramangala , Bangalore"]
        );
    }

    #[test]
    fn short_rows_are_skipped_and_blank_lines_ignored() {
        let data = load(
            "square_feet,bhk,bathrooms,location,price_inr\n\
             1000,2,2,Pune,4500000\n\
             \n\
             1200,2\n\
             1300,3,2,Pune,6100000\n",
        )
        .unwrap();
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.rows_skipped, 1);
    }

    #[test]
    fn missing_column_is_malformed() {
        let err = load("square_feet,bhk,location,price_inr\n1000,2,Pune,4500000\n").unwrap_err();
        match err {
            PredictError::MalformedDataset { message, .. } => {
                assert!(message.contains("bathrooms"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(load(""), Err(PredictError::MalformedDataset { .. })));
    }

    #[test]
    fn unparsable_number_fails_the_load_with_line() {
        let err = load(
            "square_feet,bhk,bathrooms,location,price_inr\n\
             1000,2,2,Pune,4500000\n\
             1200,two,2,Pune,5000000\n",
        )
        .unwrap_err();
        match err {
            PredictError::MalformedDataset { line, message } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("bhk"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_and_blank_numbers_are_rejected() {
        let header = "square_feet,bhk,bathrooms,location,price_inr\n";
        for row in ["NaN,2,2,Pune,1", "1000,2,2,Pune,inf", "1000,,2,Pune,100", "1000,2,2,Pune,"] {
            let text = format!("{header}{row}\n");
            assert!(
                matches!(load(&text), Err(PredictError::MalformedDataset { .. })),
                "row should be rejected: {row}"
            );
        }
    }

    #[test]
    fn blank_location_is_an_ordinary_name() {
        let data = load(
            "square_feet,bhk,bathrooms,location,price_inr\n\
             1000,2,2,,100\n\
             2000,3,2,A,200\n\
             1500,2,1,  ,150\n",
        )
        .unwrap();
        assert_eq!(data.records.len(), 3);
        assert_eq!(data.rows_skipped, 0);
        assert_eq!(data.locations.names(), ["", "A"]);
        let codes: Vec<usize> = data.records.iter().map(|r| r.location_code).collect();
        assert_eq!(codes, [0, 1, 0]);
    }

    #[test]
    fn custom_delimiter() {
        let text = "square_feet;bhk;bathrooms;location;price_inr\n1000;2;2;Pune, West;4500000\n";
        let data = load_from_reader(Cursor::new(text.as_bytes().to_vec()), b';').unwrap();
        assert_eq!(data.locations.names(), ["Pune, West"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_dataset(Path::new("/nonexistent/homeprice/dataset.csv"), b',').unwrap_err();
        assert!(matches!(err, PredictError::DatasetIo { .. }));
    }
}
