//! Decisio Runtime - evaluates decisions of a decision model
//!
//! This crate provides:
//! - Variable contexts and the per-call variable scope
//! - Expression languages and the expression evaluator
//! - Decision logic handlers with hit policies, and their registry
//! - The decision graph resolver and the scope accumulator
//! - Evaluation events, listeners and metrics
//! - The evaluation orchestrator, [`DecisionContext`]

pub mod accumulator;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod expression;
pub mod graph;
pub mod handler;
pub mod observability;
pub mod orchestrator;
pub mod settings;

// Re-export commonly used types
pub use context::{LocalContext, VariableContext, VariableScope, Variables};
pub use error::{Result, RuntimeError};
pub use event::{
    DecisionEvaluationEvent, DecisionTableEvaluation, EvaluatedInput, EvaluatedOutput,
    EvaluatedRule, EvaluationDetail, EvaluationEvent, LiteralExpressionEvaluation,
};
pub use expression::{ExpressionLanguage, ExpressionLanguages};
pub use handler::{
    DecisionLogicHandler, DecisionTableHandler, HandlerRegistry, LiteralExpressionHandler,
};
pub use observability::{
    Counter, DecisionEvaluationListener, DecisionTableEvaluationListener, MetricCollector,
};
pub use orchestrator::DecisionContext;
pub use settings::EvaluationSettings;
