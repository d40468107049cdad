//! Evaluation orchestrator
//!
//! [`DecisionContext`] evaluates a decision together with every decision it
//! requires:
//!
//! 1. resolve the evaluation order, root last
//! 2. evaluate each decision with the handler for its logic
//! 3. merge the result of every required decision into the scope
//! 4. notify the listeners with the aggregate event
//! 5. return the root's result

use crate::accumulator;
use crate::context::{VariableContext, VariableScope};
use crate::error::{Result, RuntimeError};
use crate::event::DecisionEvaluationEvent;
use crate::graph;
use crate::handler::HandlerRegistry;
use crate::observability::DecisionEvaluationListener;
use decisio_core::{Decision, DecisionResult};
use std::sync::Arc;
use tracing::debug;

/// Evaluates decisions with a set of handlers and listeners
#[derive(Clone)]
pub struct DecisionContext {
    handlers: Arc<HandlerRegistry>,
    listeners: Vec<Arc<dyn DecisionEvaluationListener>>,
}

impl DecisionContext {
    pub fn new(
        handlers: Arc<HandlerRegistry>,
        listeners: Vec<Arc<dyn DecisionEvaluationListener>>,
    ) -> Self {
        Self {
            handlers,
            listeners,
        }
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Evaluate a decision with the caller's variables
    pub fn evaluate_decision(
        &self,
        decision: &Arc<Decision>,
        variables: &dyn VariableContext,
    ) -> Result<DecisionResult> {
        let mut scope = VariableScope::from_context(variables);
        self.evaluate_in_scope(decision, &mut scope)
    }

    /// Evaluate a decision in an existing scope.
    ///
    /// Results of required decisions are merged into `scope`; the root's
    /// result is only returned.
    pub fn evaluate_in_scope(
        &self,
        decision: &Arc<Decision>,
        scope: &mut VariableScope,
    ) -> Result<DecisionResult> {
        let order = graph::resolve(decision)?;
        debug!(
            "Evaluating decision '{}' with {} required decision(s)",
            decision.key,
            order.len() - 1
        );

        let mut events = Vec::with_capacity(order.len());
        let mut root_result = DecisionResult::empty();

        for (position, current) in order.iter().enumerate() {
            let handler = self.handlers.dispatch(current)?;
            let event = handler.evaluate(current, &*scope)?;
            let result = handler.generate_decision_result(&event)?;

            if position + 1 == order.len() {
                root_result = result;
            } else {
                accumulator::merge(scope, current, &result);
            }
            events.push(event);
        }

        if let Some(event) = DecisionEvaluationEvent::from_events(events) {
            self.notify_listeners(&event)?;
        }

        Ok(root_result)
    }

    fn notify_listeners(&self, event: &DecisionEvaluationEvent) -> Result<()> {
        for listener in &self.listeners {
            listener
                .notify(event)
                .map_err(RuntimeError::listener_failure)?;
        }
        Ok(())
    }
}
