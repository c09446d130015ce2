//! Command-line parsing for the home price predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the training/prediction code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AREA_RANGE, COUNT_RANGE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "homeprice", version, about = "Home price predictor (linear regression on historical sales)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train on the dataset and print the training summary.
    Train(TrainCmdArgs),
    /// Train, then price a single property.
    Predict(PredictArgs),
    /// List the locations a prediction can use.
    Locations(TrainArgs),
    /// Train, then price every property in a CSV file.
    Batch(BatchArgs),
    /// Write a seeded synthetic dataset in the training file layout.
    Synth(SynthArgs),
}

/// Options shared by every command that trains a model.
///
/// Unset options fall back to `HOMEPRICE_DATASET` / `HOMEPRICE_SEED`
/// (a `.env` file is honored), then to built-in defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct TrainArgs {
    /// Historical sales CSV.
    #[arg(long, value_name = "CSV")]
    pub dataset: Option<PathBuf>,

    /// Seed for the train/test shuffle.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of records used for training, in (0, 1].
    #[arg(long)]
    pub train_ratio: Option<f64>,

    /// Field delimiter of the dataset.
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Debug, Args, Clone)]
pub struct TrainCmdArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Floor area in square feet (100 to 10000).
    #[arg(long, allow_negative_numbers = true)]
    pub area: f64,

    /// Number of bedrooms (1 to 10).
    #[arg(long, visible_alias = "rooms")]
    pub bhk: u32,

    /// Number of bathrooms (1 to 10).
    #[arg(long)]
    pub bathrooms: u32,

    /// Location name as it appears in the dataset.
    #[arg(long)]
    pub location: String,

    /// Print the prediction as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Properties CSV (`square_feet,bhk,bathrooms,location`).
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write results here instead of stdout.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Number of records to generate.
    #[arg(long, default_value_t = 500)]
    pub rows: usize,

    /// Generator seed.
    #[arg(long, default_value_t = 7)]
    pub seed: u64,

    /// Relative noise (standard deviation as a fraction of the price).
    #[arg(long, default_value_t = 0.08)]
    pub noise: f64,

    /// Output CSV path.
    #[arg(long, value_name = "CSV", default_value = "data/dataset.csv")]
    pub out: PathBuf,
}

/// Human-readable range hint used in validation messages.
pub fn input_ranges() -> String {
    format!(
        "square feet {}-{}, bhk/bathrooms {}-{}",
        AREA_RANGE.0, AREA_RANGE.1, COUNT_RANGE.0, COUNT_RANGE.1
    )
}
