//! Decision model
//!
//! The immutable object graph produced by a model transformer:
//! - Decisions and their requirement edges
//! - Decision logic variants (decision tables, literal expressions)
//! - Expression nodes with their lazily compiled form
//! - Decision requirements graphs

pub mod compiled;
pub mod decision;
pub mod decision_table;
pub mod expression;
pub mod literal_expression;

pub use compiled::CompiledCell;
pub use decision::{Decision, DecisionLogic, DecisionRequirementsGraph, LogicKind};
pub use decision_table::{
    BuiltinAggregator, DecisionTable, DecisionTableInput, DecisionTableOutput, DecisionTableRule,
    HitPolicy, HitPolicyEntry,
};
pub use expression::DecisionExpression;
pub use literal_expression::{DecisionVariable, LiteralExpression};
