//! Evaluation events
//!
//! Handlers describe each decision they evaluate with an [`EvaluationEvent`].
//! After a call the orchestrator folds the events of every evaluated decision
//! into one [`DecisionEvaluationEvent`] for the registered listeners.

use decisio_core::{Decision, TypedValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Value of a decision table input, evaluated once per table evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Input expression text, absent for inputs without expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    pub value: TypedValue,
}

/// One output entry of a matching rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Result name of the output
    pub name: String,

    pub value: TypedValue,
}

/// A rule whose conditions all matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Zero-based position of the rule in its table
    pub index: usize,

    /// Outputs in declared order; blank entries are omitted unless blank
    /// outputs are returned as null
    pub outputs: Vec<EvaluatedOutput>,
}

impl EvaluatedRule {
    /// Rule id, or its one-based position
    pub fn display_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("#{}", self.index + 1))
    }

    pub fn output(&self, name: &str) -> Option<&EvaluatedOutput> {
        self.outputs.iter().find(|output| output.name == name)
    }
}

/// Detail of a decision table evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTableEvaluation {
    pub decision_key: String,

    pub hit_policy: String,

    pub inputs: Vec<EvaluatedInput>,

    /// Rules selected by the hit policy, in result order
    pub matching_rules: Vec<EvaluatedRule>,

    /// Output name of a COLLECT aggregation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_result_name: Option<String>,

    /// Value of a COLLECT aggregation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_result_value: Option<TypedValue>,

    pub executed_decision_elements: u64,
}

impl DecisionTableEvaluation {
    pub fn new(decision_key: impl Into<String>, hit_policy: impl Into<String>) -> Self {
        Self {
            decision_key: decision_key.into(),
            hit_policy: hit_policy.into(),
            inputs: Vec::new(),
            matching_rules: Vec::new(),
            collect_result_name: None,
            collect_result_value: None,
            executed_decision_elements: 0,
        }
    }
}

/// Detail of a literal expression evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpressionEvaluation {
    pub output_name: String,
    pub output_value: TypedValue,
}

/// Logic-specific part of an [`EvaluationEvent`]
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationDetail {
    DecisionTable(DecisionTableEvaluation),
    LiteralExpression(LiteralExpressionEvaluation),
}

/// Evaluation of a single decision
#[derive(Debug, Clone)]
pub struct EvaluationEvent {
    pub decision: Arc<Decision>,
    pub executed_decision_elements: u64,
    pub detail: EvaluationDetail,
}

impl EvaluationEvent {
    pub fn decision_key(&self) -> &str {
        &self.decision.key
    }

    pub fn as_decision_table(&self) -> Option<&DecisionTableEvaluation> {
        match &self.detail {
            EvaluationDetail::DecisionTable(evaluation) => Some(evaluation),
            EvaluationDetail::LiteralExpression(_) => None,
        }
    }

    pub fn as_literal_expression(&self) -> Option<&LiteralExpressionEvaluation> {
        match &self.detail {
            EvaluationDetail::LiteralExpression(evaluation) => Some(evaluation),
            EvaluationDetail::DecisionTable(_) => None,
        }
    }
}

/// Aggregate event of one evaluation call
#[derive(Debug, Clone)]
pub struct DecisionEvaluationEvent {
    /// Event of the decision the caller asked for
    pub decision_result: EvaluationEvent,

    /// Number of decisions evaluated, the root included
    pub executed_decision_instances: u64,

    /// Sum of the executed elements of every evaluated decision
    pub executed_decision_elements: u64,

    /// Events of the required decisions, in evaluation order
    pub required_decision_results: Vec<EvaluationEvent>,
}

impl DecisionEvaluationEvent {
    /// Fold the events of one call; `events` is in evaluation order and ends
    /// with the root
    pub fn from_events(mut events: Vec<EvaluationEvent>) -> Option<Self> {
        let root = events.pop()?;
        let executed_decision_instances = events.len() as u64 + 1;
        let executed_decision_elements = events
            .iter()
            .map(|event| event.executed_decision_elements)
            .sum::<u64>()
            + root.executed_decision_elements;

        Some(Self {
            decision_result: root,
            executed_decision_instances,
            executed_decision_elements,
            required_decision_results: events,
        })
    }

    /// Keys of the evaluated decisions in evaluation order, root last
    pub fn evaluated_keys(&self) -> Vec<&str> {
        self.required_decision_results
            .iter()
            .chain(std::iter::once(&self.decision_result))
            .map(EvaluationEvent::decision_key)
            .collect()
    }
}
