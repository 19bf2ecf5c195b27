use serde::{Serialize, Deserialize};

use crate::data::dataset::DataSet;
use crate::error::Result;
use crate::network::network::Network;
use crate::optim::momentum::Momentum;
use crate::optim::sgd::Sgd;
use crate::train::learning_config::LearningConfig;
use crate::train::learning_event::{LearningEvent, LearningEventListener};
use crate::train::loop_fn::{LearningOutcome, SupervisedLearning};

pub const DEFAULT_MOMENTUM: f64 = 0.25;

/// A supervised learning rule: trains a network on a data set and reports
/// progress to its listeners once per iteration.
pub trait LearningRule {
    fn base(&self) -> &SupervisedLearning;
    fn base_mut(&mut self) -> &mut SupervisedLearning;

    /// Trains `network`, also reporting to `observer`, which is borrowed for
    /// this call only and so may hold references such as an output writer.
    fn learn_observed(
        &mut self,
        network: &mut Network,
        training_set: &DataSet,
        observer: &mut dyn LearningEventListener,
    ) -> Result<LearningOutcome>;

    fn learn(&mut self, network: &mut Network, training_set: &DataSet) -> Result<LearningOutcome> {
        self.learn_observed(network, training_set, &mut |_: &LearningEvent| {})
    }

    fn config(&self) -> &LearningConfig {
        &self.base().config
    }

    fn config_mut(&mut self) -> &mut LearningConfig {
        &mut self.base_mut().config
    }

    fn current_iteration(&self) -> usize {
        self.base().current_iteration()
    }

    fn total_network_error(&self) -> f64 {
        self.base().total_network_error()
    }

    fn add_boxed_listener(&mut self, listener: Box<dyn LearningEventListener>) {
        self.base_mut().add_listener(listener);
    }

    fn add_listener<L>(&mut self, listener: L)
    where
        L: LearningEventListener + 'static,
        Self: Sized,
    {
        self.add_boxed_listener(Box::new(listener));
    }
}

/// Least mean squares: the Adaline's rule.
pub struct Lms {
    base: SupervisedLearning,
}

impl Lms {
    pub fn new(config: LearningConfig) -> Lms {
        Lms { base: SupervisedLearning::new(config) }
    }
}

impl Default for Lms {
    fn default() -> Self {
        Lms::new(LearningConfig::default())
    }
}

impl LearningRule for Lms {
    fn base(&self) -> &SupervisedLearning {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SupervisedLearning {
        &mut self.base
    }

    fn learn_observed(
        &mut self,
        network: &mut Network,
        training_set: &DataSet,
        observer: &mut dyn LearningEventListener,
    ) -> Result<LearningOutcome> {
        let mut sgd = Sgd::new(self.base.config.learning_rate);
        self.base.run_observed(network, training_set, &mut sgd, observer)
    }
}

/// Backpropagation where every weight change carries a fraction of the previous one.
pub struct MomentumBackpropagation {
    base: SupervisedLearning,
    pub momentum: f64,
}

impl MomentumBackpropagation {
    pub fn new(config: LearningConfig, momentum: f64) -> MomentumBackpropagation {
        MomentumBackpropagation { base: SupervisedLearning::new(config), momentum }
    }
}

impl Default for MomentumBackpropagation {
    fn default() -> Self {
        MomentumBackpropagation::new(LearningConfig::default(), DEFAULT_MOMENTUM)
    }
}

impl LearningRule for MomentumBackpropagation {
    fn base(&self) -> &SupervisedLearning {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SupervisedLearning {
        &mut self.base
    }

    fn learn_observed(
        &mut self,
        network: &mut Network,
        training_set: &DataSet,
        observer: &mut dyn LearningEventListener,
    ) -> Result<LearningOutcome> {
        let mut update = Momentum::new(self.base.config.learning_rate, self.momentum);
        self.base.run_observed(network, training_set, &mut update, observer)
    }
}

/// Serializable choice of learning rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningRuleSpec {
    Lms,
    MomentumBackpropagation {
        #[serde(default = "default_momentum")]
        momentum: f64,
    },
}

fn default_momentum() -> f64 {
    DEFAULT_MOMENTUM
}

impl LearningRuleSpec {
    pub fn build(&self, config: LearningConfig) -> Box<dyn LearningRule> {
        match self {
            LearningRuleSpec::Lms => Box::new(Lms::new(config)),
            LearningRuleSpec::MomentumBackpropagation { momentum } => {
                Box::new(MomentumBackpropagation::new(config, *momentum))
            }
        }
    }
}
