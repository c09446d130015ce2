//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - resolves the training configuration (flags > environment > defaults)
//! - trains and publishes the model
//! - prints predictions/reports and writes optional exports

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{BatchArgs, Cli, Command, PredictArgs, SynthArgs, TrainArgs, TrainCmdArgs, input_ranges};
use crate::data::SampleConfig;
use crate::data::sample::{generate_sample, write_sample_csv};
use crate::domain::{PropertyInput, TrainConfig};
use crate::error::AppError;
use crate::io::{read_batch, score_batch, write_batch, write_batch_csv};
use crate::predict::PricePredictor;
use crate::report::{format_prediction, format_price, format_training_summary};

pub mod pipeline;

pub const ENV_DATASET: &str = "HOMEPRICE_DATASET";
pub const ENV_SEED: &str = "HOMEPRICE_SEED";

/// Entry point for the `homeprice` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Train(args) => handle_train(args),
        Command::Predict(args) => handle_predict(args),
        Command::Locations(args) => handle_locations(args),
        Command::Batch(args) => handle_batch(args),
        Command::Synth(args) => handle_synth(args),
    }
}

fn handle_train(args: TrainCmdArgs) -> Result<(), AppError> {
    let config = train_config_from_env(&args.train)?;
    let predictor = PricePredictor::new();
    pipeline::initialize(&predictor, &config)?;
    let trained = predictor.snapshot()?;

    if args.json {
        let json = serde_json::to_string_pretty(&trained.summary)
            .map_err(|e| AppError::new(2, format!("Failed to serialize training summary: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "{}",
            format_training_summary(&trained.summary, trained.locations.names())
        );
    }
    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let input = PropertyInput::new(args.area, args.bhk, args.bathrooms, args.location);
    input
        .validate()
        .map_err(|msg| AppError::new(2, format!("Invalid input: {msg} (allowed: {})", input_ranges())))?;

    let config = train_config_from_env(&args.train)?;
    let predictor = pipeline::start(&config);
    let prediction = predictor.predict_price(&input)?;

    if args.json {
        let json = serde_json::json!({
            "input": &input,
            "price_inr": prediction.price,
            "price_display": format_price(prediction.price_i64()),
            "location_match": prediction.location,
        });
        println!("{json:#}");
    } else {
        println!("{}", format_prediction(&prediction, &input.location));
    }
    Ok(())
}

fn handle_locations(args: TrainArgs) -> Result<(), AppError> {
    let config = train_config_from_env(&args)?;
    let predictor = pipeline::start(&config);
    for name in predictor.locations() {
        println!("{name}");
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = train_config_from_env(&args.train)?;
    let rows = read_batch(&args.input, config.delimiter)?;

    let predictor = pipeline::start(&config);
    let outcomes = score_batch(&predictor, rows)?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    log::info!("Scored {} rows ({failed} failed).", outcomes.len());

    match &args.output {
        Some(path) => write_batch_csv(path, &outcomes)?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_batch(&mut lock, &outcomes)?;
            lock.flush()
                .map_err(|e| AppError::new(2, format!("Failed to write to stdout: {e}")))?;
        }
    }
    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let sample = generate_sample(&SampleConfig {
        rows: args.rows,
        seed: args.seed,
        noise: args.noise,
    })?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", parent.display())))?;
    }
    write_sample_csv(&args.out, &sample)?;
    log::info!("Wrote {} records to '{}'", sample.records.len(), args.out.display());
    Ok(())
}

/// Resolve the training configuration from flags and the process environment.
pub fn train_config_from_env(args: &TrainArgs) -> Result<TrainConfig, AppError> {
    train_config_from_args(args, |key| std::env::var(key).ok())
}

/// Resolve the training configuration: flags, then `lookup`, then defaults.
pub fn train_config_from_args(
    args: &TrainArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<TrainConfig, AppError> {
    let defaults = TrainConfig::default();

    let dataset_path = match &args.dataset {
        Some(path) => path.clone(),
        None => lookup(ENV_DATASET)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset_path),
    };

    let seed = match args.seed {
        Some(seed) => seed,
        None => match lookup(ENV_SEED) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| AppError::new(2, format!("{ENV_SEED} must be a whole number, got '{raw}'")))?,
            None => defaults.seed,
        },
    };

    let delimiter = match args.delimiter {
        Some(c) => u8::try_from(c)
            .map_err(|_| AppError::new(2, "Delimiter must be a single ASCII character"))?,
        None => defaults.delimiter,
    };

    let config = TrainConfig {
        dataset_path,
        delimiter,
        seed,
        train_ratio: args.train_ratio.unwrap_or(defaults.train_ratio),
        min_reliable_samples: defaults.min_reliable_samples,
    };
    config.validate().map_err(|msg| AppError::new(2, msg))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = train_config_from_args(&TrainArgs::default(), env(&[])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from(TrainConfig::DEFAULT_DATASET));
        assert_eq!(config.seed, 42);
        assert_eq!(config.train_ratio, 0.8);
        assert_eq!(config.delimiter, b',');
    }

    #[test]
    fn env_overrides_defaults() {
        let config = train_config_from_args(
            &TrainArgs::default(),
            env(&[(ENV_DATASET, "/srv/sales.csv"), (ENV_SEED, " 7 ")]),
        )
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/srv/sales.csv"));
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn flags_override_env() {
        let args = TrainArgs {
            dataset: Some(PathBuf::from("local.csv")),
            seed: Some(1),
            train_ratio: Some(1.0),
            delimiter: Some(';'),
        };
        let config = train_config_from_args(&args, env(&[(ENV_DATASET, "/srv/sales.csv"), (ENV_SEED, "7")])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("local.csv"));
        assert_eq!(config.seed, 1);
        assert_eq!(config.train_ratio, 1.0);
        assert_eq!(config.delimiter, b';');
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = train_config_from_args(&TrainArgs::default(), env(&[(ENV_SEED, "abc")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let args = TrainArgs {
            train_ratio: Some(0.0),
            ..TrainArgs::default()
        };
        assert!(train_config_from_args(&args, env(&[])).is_err());

        let args = TrainArgs {
            delimiter: Some('é'),
            ..TrainArgs::default()
        };
        assert!(train_config_from_args(&args, env(&[])).is_err());
    }
}
