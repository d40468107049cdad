//! Observability module
//!
//! Listeners notified after evaluations, and the built-in metric collector.

pub mod listener;
pub mod metrics;

pub use listener::{DecisionEvaluationListener, DecisionTableEvaluationListener};
pub use metrics::{Counter, MetricCollector};
