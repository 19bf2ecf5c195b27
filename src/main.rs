use std::io;
use std::process;

use standard_ml::{experiment, ExperimentConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Runs one experiment described by a JSON config file, or the wine quality
/// preset when no file is given:
///   cargo run -- experiment.json
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::load_json(&path).unwrap_or_else(|e| {
            error!("cannot load config '{}': {}", path, e);
            process::exit(1);
        }),
        None => ExperimentConfig::wine_quality(),
    };

    if let Err(e) = experiment::run(&config, &mut io::stdout().lock()) {
        error!("{}", e);
        process::exit(1);
    }
}
