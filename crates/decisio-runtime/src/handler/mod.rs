//! Decision logic handlers
//!
//! A [`DecisionLogicHandler`] evaluates one kind of decision logic.
//! [`HandlerRegistry`] maps each [`LogicKind`] to its handler; the
//! orchestrator only ever talks to the registry.

mod decision_table;
mod hit_policy;
mod literal_expression;

pub use decision_table::DecisionTableHandler;
pub use literal_expression::LiteralExpressionHandler;

use crate::context::VariableContext;
use crate::error::{Result, RuntimeError};
use crate::event::EvaluationEvent;
use crate::expression::ExpressionLanguages;
use crate::observability::DecisionTableEvaluationListener;
use crate::settings::EvaluationSettings;
use decisio_core::{Decision, DecisionResult, LogicKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Evaluation strategy for one kind of decision logic
pub trait DecisionLogicHandler: Send + Sync {
    /// Evaluate a decision against the variables in scope
    fn evaluate(
        &self,
        decision: &Arc<Decision>,
        context: &dyn VariableContext,
    ) -> Result<EvaluationEvent>;

    /// Turn an evaluation event of this handler into result rows
    fn generate_decision_result(&self, event: &EvaluationEvent) -> Result<DecisionResult>;
}

/// Maps decision logic kinds to their handlers
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<LogicKind, Arc<dyn DecisionLogicHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the decision table and literal expression handlers
    pub fn with_defaults(
        settings: EvaluationSettings,
        languages: Arc<ExpressionLanguages>,
        table_listeners: Vec<Arc<dyn DecisionTableEvaluationListener>>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(
            LogicKind::DecisionTable,
            Arc::new(DecisionTableHandler::new(
                settings.clone(),
                languages.clone(),
                table_listeners,
            )),
        );
        registry.register(
            LogicKind::LiteralExpression,
            Arc::new(LiteralExpressionHandler::new(settings, languages)),
        );
        registry
    }

    /// Register a handler, replacing the one registered for `kind`
    pub fn register(&mut self, kind: LogicKind, handler: Arc<dyn DecisionLogicHandler>) {
        self.handlers.insert(kind, handler);
    }

    pub fn contains(&self, kind: LogicKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Handler for the decision's logic
    pub fn dispatch(&self, decision: &Decision) -> Result<&Arc<dyn DecisionLogicHandler>> {
        self.handlers
            .get(&decision.kind())
            .ok_or_else(|| RuntimeError::UnsupportedLogicType {
                decision: decision.key.clone(),
                kind: decision.kind().to_string(),
            })
    }
}

/// Error for a decision or event a handler cannot process
pub(crate) fn unsupported(decision: &Decision) -> RuntimeError {
    RuntimeError::UnsupportedLogicType {
        decision: decision.key.clone(),
        kind: decision.kind().to_string(),
    }
}
