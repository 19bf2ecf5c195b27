//! Swedish auto insurance: total claim payments (thousands of kronor) from
//! the number of claims per geographical zone, 63 rows.
//!
//! Network:  Adaline, 1 input → 1 linear output
//! Rule:     LMS, max error 0.01
//! Split:    60% train / 40% test, max-normalized on the training part
//!
//! Run with:
//!   cargo run --example swedish_auto_insurance [path/to/autodata.txt]
//!
//! Data source: https://www.math.muni.cz/~kolacek/docs/frvs/M7222/data/AutoInsurSweden.txt
//! saved as comma-separated `claims,payment` lines.

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

    let mut config = ExperimentConfig::swedish_auto_insurance();
    if let Some(path) = std::env::args().nth(1) {
        config.data.path = path.into();
    }

    if let Err(e) = experiment::run(&config, &mut io::stdout().lock()) {
        error!("{}", e);
        process::exit(1);
    }
}
