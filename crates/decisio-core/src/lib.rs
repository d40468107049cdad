//! Decisio Core - Core types and definitions for the Decisio decision engine
//!
//! This crate provides the fundamental types used across the Decisio workspace:
//! - Value types and typed values for runtime data
//! - The decision model (decisions, decision tables, literal expressions)
//! - Expression AST definitions
//! - The immutable decision result model
//! - Error types

pub mod ast;
pub mod error;
pub mod model;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{
    BuiltinAggregator, CompiledCell, Decision, DecisionExpression, DecisionLogic,
    DecisionRequirementsGraph, DecisionTable, DecisionTableInput, DecisionTableOutput,
    DecisionTableRule, DecisionVariable, HitPolicy, HitPolicyEntry, LiteralExpression, LogicKind,
};
pub use result::{DecisionResult, DecisionRuleResult, DecisionTableResult, RuleResult};
pub use types::{TypedValue, Value, ValueType};
