//! Decision table logic
//!
//! A decision table is an ordered set of inputs, outputs and rules together
//! with the hit policy that decides which matching rules contribute to the
//! result.

use super::expression::DecisionExpression;
use crate::error::{CoreError, Result};
use crate::types::{Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hit policy of a decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitPolicy {
    Unique,
    First,
    Priority,
    Any,
    Collect,
    RuleOrder,
    OutputOrder,
}

impl HitPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            HitPolicy::Unique => "UNIQUE",
            HitPolicy::First => "FIRST",
            HitPolicy::Priority => "PRIORITY",
            HitPolicy::Any => "ANY",
            HitPolicy::Collect => "COLLECT",
            HitPolicy::RuleOrder => "RULE ORDER",
            HitPolicy::OutputOrder => "OUTPUT ORDER",
        }
    }

    /// Policies that may return more than one row
    pub fn is_multi_row(&self) -> bool {
        matches!(
            self,
            HitPolicy::Collect | HitPolicy::RuleOrder | HitPolicy::OutputOrder
        )
    }

    /// Policies that order matches by the declared output values
    pub fn requires_output_values(&self) -> bool {
        matches!(self, HitPolicy::Priority | HitPolicy::OutputOrder)
    }
}

impl fmt::Display for HitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HitPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "UNIQUE" | "U" => Ok(HitPolicy::Unique),
            "FIRST" | "F" => Ok(HitPolicy::First),
            "PRIORITY" | "P" => Ok(HitPolicy::Priority),
            "ANY" | "A" => Ok(HitPolicy::Any),
            "COLLECT" | "C" => Ok(HitPolicy::Collect),
            "RULE ORDER" | "R" => Ok(HitPolicy::RuleOrder),
            "OUTPUT ORDER" | "O" => Ok(HitPolicy::OutputOrder),
            _ => Err(CoreError::UnknownHitPolicy(s.trim().to_string())),
        }
    }
}

/// Aggregation applied to the outputs of a COLLECT table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuiltinAggregator {
    Sum,
    Count,
    Min,
    Max,
}

impl BuiltinAggregator {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinAggregator::Sum => "SUM",
            BuiltinAggregator::Count => "COUNT",
            BuiltinAggregator::Min => "MIN",
            BuiltinAggregator::Max => "MAX",
        }
    }
}

impl fmt::Display for BuiltinAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BuiltinAggregator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUM" | "+" => Ok(BuiltinAggregator::Sum),
            "COUNT" | "#" => Ok(BuiltinAggregator::Count),
            "MIN" | "<" => Ok(BuiltinAggregator::Min),
            "MAX" | ">" => Ok(BuiltinAggregator::Max),
            _ => Err(CoreError::UnknownHitPolicy(s.trim().to_string())),
        }
    }
}

/// Hit policy together with its optional aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitPolicyEntry {
    pub hit_policy: HitPolicy,
    pub aggregator: Option<BuiltinAggregator>,
}

impl HitPolicyEntry {
    pub fn new(hit_policy: HitPolicy) -> Self {
        Self {
            hit_policy,
            aggregator: None,
        }
    }

    pub fn collect(aggregator: BuiltinAggregator) -> Self {
        Self {
            hit_policy: HitPolicy::Collect,
            aggregator: Some(aggregator),
        }
    }

    /// Build an entry, rejecting aggregators on anything but COLLECT
    pub fn with_aggregator(
        hit_policy: HitPolicy,
        aggregator: Option<BuiltinAggregator>,
    ) -> Result<Self> {
        if aggregator.is_some() && hit_policy != HitPolicy::Collect {
            return Err(CoreError::UnknownHitPolicy(format!(
                "{} {}",
                hit_policy,
                aggregator.map(|a| a.name()).unwrap_or_default()
            )));
        }
        Ok(Self {
            hit_policy,
            aggregator,
        })
    }
}

impl Default for HitPolicyEntry {
    fn default() -> Self {
        Self::new(HitPolicy::Unique)
    }
}

impl fmt::Display for HitPolicyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.aggregator {
            Some(aggregator) => write!(f, "{} {}", self.hit_policy, aggregator),
            None => write!(f, "{}", self.hit_policy),
        }
    }
}

impl FromStr for HitPolicyEntry {
    type Err = CoreError;

    /// Parses `UNIQUE`, `RULE ORDER`, `COLLECT SUM`, `C+` and similar forms
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(hit_policy) = trimmed.parse::<HitPolicy>() {
            return Ok(Self::new(hit_policy));
        }

        // short forms: C+, C#, C<, C>
        let upper = trimmed.to_ascii_uppercase();
        if upper.len() == 2 && upper.starts_with('C') {
            return Ok(Self::collect(upper[1..].parse()?));
        }

        match trimmed.rsplit_once(char::is_whitespace) {
            Some((policy, aggregator)) => {
                let hit_policy = policy
                    .parse::<HitPolicy>()
                    .map_err(|_| CoreError::UnknownHitPolicy(trimmed.to_string()))?;
                let aggregator = aggregator
                    .parse::<BuiltinAggregator>()
                    .map_err(|_| CoreError::UnknownHitPolicy(trimmed.to_string()))?;
                Self::with_aggregator(hit_policy, Some(aggregator))
            }
            None => Err(CoreError::UnknownHitPolicy(trimmed.to_string())),
        }
    }
}

/// Input clause of a decision table
#[derive(Debug)]
pub struct DecisionTableInput {
    pub id: Option<String>,
    pub label: Option<String>,
    /// Expression producing the input value; a missing expression yields null
    pub expression: Option<DecisionExpression>,
    /// Name the input value is bound to while evaluating input entries
    pub input_variable: String,
    pub type_definition: ValueType,
}

impl DecisionTableInput {
    pub const DEFAULT_INPUT_VARIABLE: &'static str = "cellInput";

    pub fn new(expression: DecisionExpression) -> Self {
        Self {
            id: None,
            label: None,
            expression: Some(expression),
            input_variable: Self::DEFAULT_INPUT_VARIABLE.to_string(),
            type_definition: ValueType::Untyped,
        }
    }

    pub fn with_type(mut self, type_definition: ValueType) -> Self {
        self.type_definition = type_definition;
        self
    }

    pub fn with_input_variable(mut self, name: impl Into<String>) -> Self {
        self.input_variable = name.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Output clause of a decision table
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTableOutput {
    pub id: Option<String>,
    pub label: Option<String>,
    /// Name the output is keyed by in result rows
    pub name: Option<String>,
    pub type_definition: ValueType,
    /// Allowed values in priority order, used by PRIORITY and OUTPUT ORDER
    pub output_values: Vec<Value>,
}

impl DecisionTableOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            label: None,
            name: Some(name.into()),
            type_definition: ValueType::Untyped,
            output_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_definition: ValueType) -> Self {
        self.type_definition = type_definition;
        self
    }

    pub fn with_output_values(mut self, values: Vec<Value>) -> Self {
        self.output_values = values;
        self
    }

    /// Key used for this output in result rows
    pub fn result_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.label.as_deref())
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

/// One rule: input entries (conditions) and output entries (conclusions)
#[derive(Debug)]
pub struct DecisionTableRule {
    pub id: Option<String>,
    pub conditions: Vec<DecisionExpression>,
    pub conclusions: Vec<DecisionExpression>,
}

impl DecisionTableRule {
    pub fn new(conditions: Vec<DecisionExpression>, conclusions: Vec<DecisionExpression>) -> Self {
        Self {
            id: None,
            conditions,
            conclusions,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct DecisionTable {
    pub hit_policy: HitPolicyEntry,
    pub inputs: Vec<DecisionTableInput>,
    pub outputs: Vec<DecisionTableOutput>,
    pub rules: Vec<DecisionTableRule>,
}

impl DecisionTable {
    pub fn new(hit_policy: HitPolicyEntry) -> Self {
        Self {
            hit_policy,
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: DecisionTableInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_output(mut self, output: DecisionTableOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn with_rule(mut self, rule: DecisionTableRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of decision elements touched by one evaluation
    pub fn element_count(&self) -> u64 {
        ((self.inputs.len() + self.outputs.len()) * self.rules.len()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_policy_from_str() {
        assert_eq!("unique".parse::<HitPolicy>().unwrap(), HitPolicy::Unique);
        assert_eq!(
            "RULE ORDER".parse::<HitPolicy>().unwrap(),
            HitPolicy::RuleOrder
        );
        assert_eq!(
            "rule_order".parse::<HitPolicy>().unwrap(),
            HitPolicy::RuleOrder
        );
        assert_eq!(
            "Output Order".parse::<HitPolicy>().unwrap(),
            HitPolicy::OutputOrder
        );
        assert!("SOMETIMES".parse::<HitPolicy>().is_err());
    }

    #[test]
    fn test_hit_policy_entry_from_str() {
        let entry: HitPolicyEntry = "COLLECT SUM".parse().unwrap();
        assert_eq!(entry.hit_policy, HitPolicy::Collect);
        assert_eq!(entry.aggregator, Some(BuiltinAggregator::Sum));

        let entry: HitPolicyEntry = "C#".parse().unwrap();
        assert_eq!(entry.aggregator, Some(BuiltinAggregator::Count));

        let entry: HitPolicyEntry = "rule order".parse().unwrap();
        assert_eq!(entry, HitPolicyEntry::new(HitPolicy::RuleOrder));

        let err = "FIRST SUM".parse::<HitPolicyEntry>().unwrap_err();
        assert_eq!(err.code(), "DMN-02009");
        assert!("COLLECT MEDIAN".parse::<HitPolicyEntry>().is_err());
    }

    #[test]
    fn test_hit_policy_entry_display() {
        assert_eq!(
            HitPolicyEntry::collect(BuiltinAggregator::Max).to_string(),
            "COLLECT MAX"
        );
        assert_eq!(HitPolicyEntry::default().to_string(), "UNIQUE");
    }

    #[test]
    fn test_element_count() {
        let table = DecisionTable::new(HitPolicyEntry::default())
            .with_input(DecisionTableInput::new(DecisionExpression::new("x")))
            .with_output(DecisionTableOutput::new("y"))
            .with_rule(DecisionTableRule::new(
                vec![DecisionExpression::new("1")],
                vec![DecisionExpression::new("2")],
            ))
            .with_rule(DecisionTableRule::new(
                vec![DecisionExpression::new("2")],
                vec![DecisionExpression::new("3")],
            ));
        assert_eq!(table.element_count(), 4);
    }

    #[test]
    fn test_output_result_name_fallback() {
        let mut output = DecisionTableOutput::new("result");
        assert_eq!(output.result_name(), "result");

        output.name = None;
        output.label = Some("Label".to_string());
        assert_eq!(output.result_name(), "Label");
    }
}
