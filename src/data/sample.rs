//! Synthetic property sales generation.
//!
//! Produces datasets in the same file layout the loader reads, drawn from a
//! known linear price model plus log-normal noise. Used for demos (`homeprice
//! synth`) and as test fixtures with a known ground truth.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::loader::REQUIRED_COLUMNS;
use crate::domain::{AREA_RANGE, LocationTable, Record};
use crate::error::AppError;

/// Default neighbourhoods, with a price premium per square foot (INR).
pub const SAMPLE_LOCATIONS: [(&str, f64); 7] = [
    ("Mumbai", 9_500.0),
    ("Delhi", 7_800.0),
    ("Bangalore", 6_900.0),
    ("Hyderabad", 5_600.0),
    ("Chennai", 5_900.0),
    ("Pune", 6_200.0),
    ("Kolkata", 4_800.0),
];

/// Flat premium per extra bathroom (INR).
const BATHROOM_PREMIUM: f64 = 350_000.0;
/// Flat premium per bedroom (INR).
const ROOM_PREMIUM: f64 = 250_000.0;
/// Typical built-up area per bedroom (sq ft), used to keep rows plausible.
const AREA_PER_ROOM: f64 = 550.0;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub rows: usize,
    pub seed: u64,
    /// Relative noise (std dev of the log price perturbation).
    pub noise: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: 500,
            seed: 7,
            noise: 0.08,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub records: Vec<Record>,
    pub locations: LocationTable,
}

impl SampleData {
    /// Location name for a record's code.
    fn location_of(&self, record: &Record) -> &str {
        self.locations.name(record.location_code).unwrap_or("")
    }
}

pub fn generate_sample(config: &SampleConfig) -> Result<SampleData, AppError> {
    if config.rows == 0 {
        return Err(AppError::new(2, "Row count must be > 0."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let locations: LocationTable = SAMPLE_LOCATIONS.iter().map(|(name, _)| *name).collect();
    let mut records = Vec::with_capacity(config.rows);

    for _ in 0..config.rows {
        let location_code = rng.gen_range(0..SAMPLE_LOCATIONS.len());
        let (_, per_sqft) = SAMPLE_LOCATIONS[location_code];

        let rooms: u32 = rng.gen_range(1..=5);
        let bathrooms: u32 = rng.gen_range(1..=rooms + 1);

        // Area scales with room count, with +-30% spread.
        let spread = rng.gen_range(0.7..=1.3);
        let (area_min, area_max) = AREA_RANGE;
        let area = (f64::from(rooms) * AREA_PER_ROOM * spread)
            .round()
            .clamp(area_min, area_max);

        let base = area * per_sqft + f64::from(rooms) * ROOM_PREMIUM + f64::from(bathrooms) * BATHROOM_PREMIUM;
        let z: f64 = normal.sample(&mut rng);
        let price = (base * z.exp()).round();

        records.push(Record {
            area,
            rooms,
            bathrooms,
            location_code,
            price,
        });
    }

    Ok(SampleData { records, locations })
}

/// Write a sample to `path` in the dataset file layout.
pub fn write_sample_csv(path: &Path, sample: &SampleData) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create dataset '{}': {e}", path.display())))?;
    write_sample(file, sample)
}

/// Write a sample to any writer in the dataset file layout.
pub fn write_sample<W: Write>(writer: W, sample: &SampleData) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(REQUIRED_COLUMNS)
        .map_err(|e| AppError::new(2, format!("Failed to write dataset header: {e}")))?;

    for r in &sample.records {
        out.write_record([
            format!("{}", r.area),
            r.rooms.to_string(),
            r.bathrooms.to_string(),
            sample.location_of(r).to_string(),
            format!("{:.0}", r.price),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write dataset row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush dataset: {e}")))?;
    Ok(())
}
