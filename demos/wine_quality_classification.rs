//! White wine quality: 11 chemical measures, quality score one-hot encoded
//! over 10 output columns, 4898 rows, tab-separated with a header line.
//!
//! Network:  11 → 20 → 15 → 10, sigmoid
//! Rule:     momentum backpropagation, learning rate 0.1, momentum 0.25,
//!           at most 5000 iterations
//! Split:    60% train / 40% test, max-normalized on the training part
//!
//! Run with:
//!   cargo run --example wine_quality_classification --release [path/to/wine.txt]
//!
//! Data source: http://archive.ics.uci.edu/ml/machine-learning-databases/wine-quality/winequality-white.csv

use std::io;
use std::process;

use standard_ml::{experiment, ExperimentConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut config = ExperimentConfig::wine_quality();
    if let Some(path) = std::env::args().nth(1) {
        config.data.path = path.into();
    }

    if let Err(e) = experiment::run(&config, &mut io::stdout().lock()) {
        error!("{}", e);
        process::exit(1);
    }
}
