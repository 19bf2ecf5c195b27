use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::data::normalizer::NormalizerKind;
use crate::error::{NnError, Result};
use crate::network::spec::NetworkSpec;
use crate::train::learning_config::LearningConfig;
use crate::train::rules::{LearningRuleSpec, DEFAULT_MOMENTUM};

/// Where the data set lives and how its columns are laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    pub input_count: usize,
    pub output_count: usize,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub has_header: bool,
}

fn default_delimiter() -> String {
    ",".into()
}

/// What the network's outputs mean, which decides how it is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    /// Continuous targets: mean squared and mean absolute error.
    Regression,
    /// One output per class: confusion matrix and per-class metrics.
    Classification { labels: Vec<String> },
}

/// Everything one experiment run needs, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    pub data: DataConfig,
    /// Share of rows used for training; the rest is the test set.
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,
    /// Seeds the split and the initial weights.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub normalizer: NormalizerKind,
    pub network: NetworkSpec,
    pub learning_rule: LearningRuleSpec,
    #[serde(default)]
    pub learning: LearningConfig,
    pub task: Task,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Print a progress line every this many iterations.
    #[serde(default = "default_report_every")]
    pub report_every: usize,
}

fn default_train_ratio() -> f64 {
    0.6
}

fn default_model_path() -> PathBuf {
    PathBuf::from("nn1.nnet")
}

fn default_report_every() -> usize {
    1
}

impl ExperimentConfig {
    /// Claim payments against claim counts in Swedish auto insurance:
    /// an Adaline trained by LMS on two comma-separated columns.
    pub fn swedish_auto_insurance() -> ExperimentConfig {
        ExperimentConfig {
            name: "Swedish auto insurance".into(),
            data: DataConfig {
                path: PathBuf::from("data_sets/ml10standard/autodata.txt"),
                input_count: 1,
                output_count: 1,
                delimiter: ",".into(),
                has_header: false,
            },
            train_ratio: default_train_ratio(),
            seed: None,
            normalizer: NormalizerKind::Max,
            network: NetworkSpec::Adaline,
            learning_rule: LearningRuleSpec::Lms,
            learning: LearningConfig::default().with_max_iterations(10_000),
            task: Task::Regression,
            model_path: default_model_path(),
            report_every: default_report_every(),
        }
    }

    /// White wine quality from 11 chemical measures, one output per score 1..=10.
    pub fn wine_quality() -> ExperimentConfig {
        ExperimentConfig {
            name: "Wine quality classification".into(),
            data: DataConfig {
                path: PathBuf::from("data_sets/ml10standard/wine.txt"),
                input_count: 11,
                output_count: 10,
                delimiter: "\t".into(),
                has_header: true,
            },
            train_ratio: default_train_ratio(),
            seed: None,
            normalizer: NormalizerKind::Max,
            network: NetworkSpec::MultiLayerPerceptron {
                hidden: vec![20, 15],
                activation: ActivationFunction::Sigmoid,
            },
            learning_rule: LearningRuleSpec::MomentumBackpropagation { momentum: DEFAULT_MOMENTUM },
            learning: LearningConfig::default()
                .with_learning_rate(0.1)
                .with_max_iterations(5000),
            task: Task::Classification {
                labels: (1..=10).map(|i| i.to_string()).collect(),
            },
            model_path: default_model_path(),
            report_every: default_report_every(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(NnError::InvalidConfig(format!(
                "train_ratio must lie strictly between 0 and 1, got {}", self.train_ratio
            )));
        }
        if self.data.input_count == 0 || self.data.output_count == 0 {
            return Err(NnError::InvalidConfig("data needs at least one input and one output column".into()));
        }
        if self.data.delimiter.is_empty() {
            return Err(NnError::InvalidConfig("delimiter must not be empty".into()));
        }
        if self.report_every == 0 {
            return Err(NnError::InvalidConfig("report_every must be at least 1".into()));
        }
        if let Task::Classification { labels } = &self.task {
            if labels.len() != self.data.output_count {
                return Err(NnError::InvalidConfig(format!(
                    "{} class labels for {} output columns", labels.len(), self.data.output_count
                )));
            }
        }
        self.learning.validate()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
        let file = File::open(path)?;
        let config: ExperimentConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(ExperimentConfig::swedish_auto_insurance().validate().is_ok());
        assert!(ExperimentConfig::wine_quality().validate().is_ok());
    }

    #[test]
    fn presets_report_every_iteration() {
        assert_eq!(ExperimentConfig::swedish_auto_insurance().report_every, 1);
        assert_eq!(ExperimentConfig::wine_quality().report_every, 1);
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = r#"{
            "name": "tiny",
            "data": { "path": "d.csv", "input_count": 2, "output_count": 1 },
            "network": { "type": "adaline" },
            "learning_rule": { "type": "lms" },
            "task": { "type": "regression" }
        }"#;
        let cfg: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.train_ratio, 0.6);
        assert_eq!(cfg.data.delimiter, ",");
        assert_eq!(cfg.model_path, PathBuf::from("nn1.nnet"));
        assert_eq!(cfg.normalizer, NormalizerKind::Max);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn label_count_must_match_outputs() {
        let mut cfg = ExperimentConfig::wine_quality();
        cfg.task = Task::Classification { labels: vec!["a".into()] };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("standard_ml_cfg_{}.json", std::process::id()));
        ExperimentConfig::wine_quality().save_json(&path).unwrap();
        let loaded = ExperimentConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.network, ExperimentConfig::wine_quality().network);
        assert_eq!(loaded.learning.max_iterations, Some(5000));
    }
}
