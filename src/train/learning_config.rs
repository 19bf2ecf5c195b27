use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};

/// Stops learning once the total error has moved less than `delta` for
/// `iterations` consecutive iterations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinErrorChange {
    pub delta: f64,
    pub iterations: usize,
}

/// Configuration for a supervised learning run.
///
/// # Fields
/// - `learning_rate`    — step size of every weight update
/// - `max_error`        — learning stops once the total network error drops below it
/// - `max_iterations`   — optional cap on full passes over the training set;
///                        `None` keeps going until convergence or `stop_flag`
/// - `batch_size`       — samples per weight update; `1` is online learning,
///                        anything `>=` the training set size is batch mode
/// - `shuffle`          — reorder the training rows before every pass
/// - `min_error_change` — optional stall detection
/// - `seed`             — seeds the shuffle order; entropy when `None`
/// - `stop_flag`        — optional atomic flag; when set to `true` from another
///                        thread the run ends after the current iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub learning_rate: f64,
    pub max_error: f64,
    pub max_iterations: Option<usize>,
    pub batch_size: usize,
    pub shuffle: bool,
    pub min_error_change: Option<MinErrorChange>,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        LearningConfig {
            learning_rate: 0.1,
            max_error: 0.01,
            max_iterations: None,
            batch_size: 1,
            shuffle: false,
            min_error_change: None,
            seed: None,
            stop_flag: None,
        }
    }
}

impl LearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0) || !self.learning_rate.is_finite() {
            return Err(NnError::InvalidConfig(format!(
                "learning_rate must be positive, got {}", self.learning_rate
            )));
        }
        if !(self.max_error >= 0.0) {
            return Err(NnError::InvalidConfig(format!(
                "max_error must not be negative, got {}", self.max_error
            )));
        }
        if self.batch_size == 0 {
            return Err(NnError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.max_iterations == Some(0) {
            return Err(NnError::InvalidConfig("max_iterations must be at least 1".into()));
        }
        if let Some(change) = self.min_error_change {
            if change.iterations == 0 || !(change.delta >= 0.0) {
                return Err(NnError::InvalidConfig(
                    "min_error_change needs a non-negative delta and at least 1 iteration".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(LearningConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: LearningConfig = serde_json::from_str(r#"{"max_iterations":5000}"#).unwrap();
        assert_eq!(cfg.max_iterations, Some(5000));
        assert_eq!(cfg.learning_rate, 0.1);
        assert_eq!(cfg.batch_size, 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(LearningConfig::default().with_learning_rate(0.0).validate().is_err());
        assert!(LearningConfig::default().with_max_error(-1.0).validate().is_err());
        let mut cfg = LearningConfig::default();
        cfg.batch_size = 0;
        assert!(cfg.validate().is_err());
    }
}
