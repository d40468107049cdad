//! Decision-table view of a decision result

use super::decision_result::DecisionResult;
use super::rule_result::RuleResult;
use crate::error::{CoreError, Result};
use crate::types::Value;
use std::collections::HashMap;
use std::ops::Deref;

/// One matched rule's outputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionRuleResult(RuleResult);

impl DecisionRuleResult {
    pub fn into_inner(self) -> RuleResult {
        self.0
    }
}

impl Deref for DecisionRuleResult {
    type Target = RuleResult;

    fn deref(&self) -> &RuleResult {
        &self.0
    }
}

impl From<RuleResult> for DecisionRuleResult {
    fn from(row: RuleResult) -> Self {
        Self(row)
    }
}

/// Rows of a decision table evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionTableResult {
    rows: Vec<DecisionRuleResult>,
}

impl DecisionTableResult {
    /// Re-wrap a decision result, preserving every row and entry
    pub fn wrap(result: &DecisionResult) -> Self {
        Self {
            rows: result
                .iter()
                .cloned()
                .map(DecisionRuleResult::from)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DecisionRuleResult> {
        self.rows.get(index)
    }

    pub fn first_result(&self) -> Option<&DecisionRuleResult> {
        self.rows.first()
    }

    pub fn single_result(&self) -> Result<Option<&DecisionRuleResult>> {
        match self.rows.len() {
            0 => Ok(None),
            1 => Ok(self.rows.first()),
            count => Err(CoreError::AmbiguousResult { count }),
        }
    }

    /// The only entry of the only row
    pub fn single_entry(&self) -> Result<Option<&Value>> {
        match self.single_result()? {
            Some(row) => row.single_entry(),
            None => Ok(None),
        }
    }

    pub fn collect_entries(&self, name: &str) -> Vec<Value> {
        self.rows
            .iter()
            .filter_map(|row| row.get(name).cloned())
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecisionRuleResult> {
        self.rows.iter()
    }

    pub fn result_list(&self) -> Vec<HashMap<String, Value>> {
        self.rows.iter().map(|row| row.entry_map()).collect()
    }
}

impl From<DecisionResult> for DecisionTableResult {
    fn from(result: DecisionResult) -> Self {
        Self::wrap(&result)
    }
}
