//! Evaluation listeners

use crate::event::{DecisionEvaluationEvent, DecisionTableEvaluation};

/// Notified once per evaluation call with the aggregate event.
///
/// An error returned by a listener fails the evaluation call.
pub trait DecisionEvaluationListener: Send + Sync {
    fn notify(&self, event: &DecisionEvaluationEvent) -> anyhow::Result<()>;
}

/// Notified after every decision table evaluation, once its hit policy has
/// been applied
pub trait DecisionTableEvaluationListener: Send + Sync {
    fn notify(&self, evaluation: &DecisionTableEvaluation) -> anyhow::Result<()>;
}
