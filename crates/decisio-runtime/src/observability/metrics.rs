//! Evaluation metrics

use super::listener::DecisionEvaluationListener;
use crate::event::DecisionEvaluationEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter metric
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    value: Arc<AtomicU64>,
}

impl Counter {
    /// Create a new counter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Increment the counter
    pub fn inc(&self) {
        self.add(1);
    }

    /// Add a value to the counter
    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    /// Get the current value
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset the counter
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Running totals over every evaluation call of an engine
#[derive(Debug, Clone)]
pub struct MetricCollector {
    executed_decision_instances: Counter,
    executed_decision_elements: Counter,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self {
            executed_decision_instances: Counter::new("executed_decision_instances"),
            executed_decision_elements: Counter::new("executed_decision_elements"),
        }
    }

    pub fn executed_decision_instances(&self) -> u64 {
        self.executed_decision_instances.get()
    }

    pub fn executed_decision_elements(&self) -> u64 {
        self.executed_decision_elements.get()
    }

    /// Reset every counter
    pub fn clear(&self) {
        self.executed_decision_instances.reset();
        self.executed_decision_elements.reset();
    }
}

impl Default for MetricCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionEvaluationListener for MetricCollector {
    fn notify(&self, event: &DecisionEvaluationEvent) -> anyhow::Result<()> {
        self.executed_decision_instances
            .add(event.executed_decision_instances);
        self.executed_decision_elements
            .add(event.executed_decision_elements);
        Ok(())
    }
}
