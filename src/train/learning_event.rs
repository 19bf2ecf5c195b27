use std::sync::mpsc;

use serde::{Serialize, Deserialize};

/// Snapshot taken at the end of every learning iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number; one iteration is one pass over the training set.
    pub iteration: usize,
    /// Mean squared error accumulated over this pass.
    pub total_network_error: f64,
    /// Error of the previous iteration, if there was one.
    pub previous_error: Option<f64>,
    /// Wall-clock duration of this iteration in milliseconds.
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MaxErrorReached,
    MaxIterationsReached,
    ErrorChangeStalled,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LearningEvent {
    IterationEnded(IterationStats),
    /// Sent exactly once, after the final `IterationEnded`.
    LearningStopped { stats: IterationStats, reason: StopReason },
}

/// Receives learning events synchronously from inside the learning call.
pub trait LearningEventListener {
    fn handle_learning_event(&mut self, event: &LearningEvent);
}

impl<F> LearningEventListener for F
where
    F: FnMut(&LearningEvent),
{
    fn handle_learning_event(&mut self, event: &LearningEvent) {
        self(event)
    }
}

/// Forwards per-iteration stats over a channel, e.g. to a thread drawing progress.
/// A dropped receiver is ignored; use `LearningConfig::stop_flag` to end a run early.
pub struct ChannelListener(pub mpsc::Sender<IterationStats>);

impl LearningEventListener for ChannelListener {
    fn handle_learning_event(&mut self, event: &LearningEvent) {
        if let LearningEvent::IterationEnded(stats) = event {
            let _ = self.0.send(stats.clone());
        }
    }
}
