pub mod learning_config;
pub mod learning_event;
pub mod loop_fn;
pub mod rules;

pub use learning_config::{LearningConfig, MinErrorChange};
pub use learning_event::{ChannelListener, IterationStats, LearningEvent, LearningEventListener, StopReason};
pub use loop_fn::{LearningOutcome, SupervisedLearning};
pub use rules::{LearningRule, LearningRuleSpec, Lms, MomentumBackpropagation};
