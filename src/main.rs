//! Train and evaluate the classifier on CSV datasets.
//!
//! Usage:
//!   cargo run --release -- --train data/smallTrain.csv --validation data/smallValidation.csv \
//!       --hidden-units 4 --epochs 2 --init uniform --learning-rate 0.1 --metrics-out metrics.txt

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use ferrite_mlp::data::load_csv;
use ferrite_mlp::train::{train_and_validate, TrainReport};
use ferrite_mlp::{InitMode, TrainConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InitArg {
    Zero,
    Uniform,
}

impl From<InitArg> for InitMode {
    fn from(arg: InitArg) -> Self {
        match arg {
            InitArg::Zero => InitMode::Zero,
            InitArg::Uniform => InitMode::Uniform,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ferrite-mlp")]
#[command(about = "Train a one-hidden-layer classifier with online SGD")]
struct Args {
    /// Training CSV (label in the first column, features after it)
    #[arg(long)]
    train: PathBuf,

    /// Validation CSV, same layout as the training file
    #[arg(long)]
    validation: PathBuf,

    /// JSON training config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of hidden units
    #[arg(long)]
    hidden_units: Option<usize>,

    /// Number of epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Weight initialization
    #[arg(long, value_enum)]
    init: Option<InitArg>,

    /// SGD learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Number of output classes
    #[arg(long)]
    num_classes: Option<usize>,

    /// Seed for uniform initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Write predicted training labels here, one per line
    #[arg(long)]
    train_out: Option<PathBuf>,

    /// Write predicted validation labels here, one per line
    #[arg(long)]
    validation_out: Option<PathBuf>,

    /// Write per-epoch losses and final error rates here
    #[arg(long)]
    metrics_out: Option<PathBuf>,

    /// Save the trained parameters as JSON
    #[arg(long)]
    model_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    info!("training with {:?}", config);

    let train = load_csv(&args.train, config.num_classes)
        .with_context(|| format!("loading {}", args.train.display()))?;
    let valid = load_csv(&args.validation, config.num_classes)
        .with_context(|| format!("loading {}", args.validation.display()))?;

    let report = train_and_validate(&train, &valid, &config)?;

    if let Some(path) = &args.train_out {
        write_labels(path, &report.train_predictions)?;
    }
    if let Some(path) = &args.validation_out {
        write_labels(path, &report.valid_predictions)?;
    }
    if let Some(path) = &args.metrics_out {
        write_metrics(path, &report)?;
    }
    if let Some(path) = &args.model_out {
        report.params.save_json(path)
            .with_context(|| format!("saving {}", path.display()))?;
    }

    println!("error(train): {:.6}", report.train_error);
    println!("error(validation): {:.6}", report.valid_error);
    Ok(())
}

fn build_config(args: &Args) -> Result<TrainConfig> {
    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let hidden_units = args.hidden_units.context("--hidden-units is required without --config")?;
            let epochs = args.epochs.context("--epochs is required without --config")?;
            let init = args.init.context("--init is required without --config")?;
            let lr = args.learning_rate.context("--learning-rate is required without --config")?;
            TrainConfig::new(hidden_units, epochs, init.into(), lr)
        }
    };

    if let Some(v) = args.hidden_units { config.hidden_units = v; }
    if let Some(v) = args.epochs { config.num_epochs = v; }
    if let Some(v) = args.init { config.init_mode = v.into(); }
    if let Some(v) = args.learning_rate { config.learning_rate = v; }
    if let Some(v) = args.num_classes { config.num_classes = v; }
    if args.seed.is_some() { config.seed = args.seed; }

    config.validate()?;
    Ok(config)
}

fn write_labels(path: &Path, labels: &[usize]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for label in labels {
        writeln!(out, "{}", label)?;
    }
    out.flush()?;
    Ok(())
}

fn write_metrics(path: &Path, report: &TrainReport) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (i, (tr, va)) in report.train_losses.iter().zip(report.valid_losses.iter()).enumerate() {
        writeln!(out, "epoch={} crossentropy(train): {}", i + 1, tr)?;
        writeln!(out, "epoch={} crossentropy(validation): {}", i + 1, va)?;
    }
    writeln!(out, "error(train): {}", report.train_error)?;
    writeln!(out, "error(validation): {}", report.valid_error)?;
    out.flush()?;
    Ok(())
}
