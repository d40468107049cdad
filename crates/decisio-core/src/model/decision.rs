//! Decisions and decision requirements graphs

use super::decision_table::DecisionTable;
use super::literal_expression::LiteralExpression;
use std::fmt;
use std::sync::Arc;

/// Tag of a decision logic variant, used to pick an evaluation handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicKind {
    DecisionTable,
    LiteralExpression,
}

impl fmt::Display for LogicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicKind::DecisionTable => write!(f, "DecisionTable"),
            LogicKind::LiteralExpression => write!(f, "LiteralExpression"),
        }
    }
}

/// The logic backing a decision
#[derive(Debug)]
pub enum DecisionLogic {
    DecisionTable(DecisionTable),
    LiteralExpression(LiteralExpression),
}

impl DecisionLogic {
    pub fn kind(&self) -> LogicKind {
        match self {
            DecisionLogic::DecisionTable(_) => LogicKind::DecisionTable,
            DecisionLogic::LiteralExpression(_) => LogicKind::LiteralExpression,
        }
    }
}

/// A named decision in a decision model.
///
/// Decisions are immutable once built. Requirements are shared `Arc`s, so a
/// decision required by several others exists once in memory.
#[derive(Debug)]
pub struct Decision {
    pub key: String,
    pub name: Option<String>,
    pub logic: DecisionLogic,
    pub required_decisions: Vec<Arc<Decision>>,
}

impl Decision {
    pub fn new(key: impl Into<String>, logic: DecisionLogic) -> Self {
        Self {
            key: key.into(),
            name: None,
            logic,
            required_decisions: Vec::new(),
        }
    }

    pub fn decision_table(key: impl Into<String>, table: DecisionTable) -> Self {
        Self::new(key, DecisionLogic::DecisionTable(table))
    }

    pub fn literal_expression(key: impl Into<String>, literal: LiteralExpression) -> Self {
        Self::new(key, DecisionLogic::LiteralExpression(literal))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_requirement(mut self, decision: Arc<Decision>) -> Self {
        self.required_decisions.push(decision);
        self
    }

    pub fn kind(&self) -> LogicKind {
        self.logic.kind()
    }

    pub fn is_decision_table(&self) -> bool {
        self.kind() == LogicKind::DecisionTable
    }

    /// The decision table, if this decision is backed by one
    pub fn as_decision_table(&self) -> Option<&DecisionTable> {
        match &self.logic {
            DecisionLogic::DecisionTable(table) => Some(table),
            DecisionLogic::LiteralExpression(_) => None,
        }
    }

    pub fn as_literal_expression(&self) -> Option<&LiteralExpression> {
        match &self.logic {
            DecisionLogic::LiteralExpression(literal) => Some(literal),
            DecisionLogic::DecisionTable(_) => None,
        }
    }
}

/// All decisions defined by one model document
#[derive(Debug, Default)]
pub struct DecisionRequirementsGraph {
    pub key: String,
    pub name: Option<String>,
    pub decisions: Vec<Arc<Decision>>,
}

impl DecisionRequirementsGraph {
    pub fn new(key: impl Into<String>, decisions: Vec<Arc<Decision>>) -> Self {
        Self {
            key: key.into(),
            name: None,
            decisions,
        }
    }

    pub fn decision(&self, key: &str) -> Option<&Arc<Decision>> {
        self.decisions.iter().find(|d| d.key == key)
    }

    pub fn decision_keys(&self) -> Vec<&str> {
        self.decisions.iter().map(|d| d.key.as_str()).collect()
    }
}
