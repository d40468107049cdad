//! Result of evaluating a decision

use super::rule_result::RuleResult;
use crate::error::{CoreError, Result};
use crate::types::Value;
use std::collections::HashMap;

/// Ordered, 0-indexed sequence of result rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionResult {
    rows: Vec<RuleResult>,
}

impl DecisionResult {
    pub fn new(rows: Vec<RuleResult>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RuleResult> {
        self.rows.get(index)
    }

    pub fn first_result(&self) -> Option<&RuleResult> {
        self.rows.first()
    }

    /// The only row; fails when there is more than one
    pub fn single_result(&self) -> Result<Option<&RuleResult>> {
        match self.rows.len() {
            0 => Ok(None),
            1 => Ok(self.rows.first()),
            count => Err(CoreError::AmbiguousResult { count }),
        }
    }

    /// Values of one output across all rows, skipping rows without it
    pub fn collect_entries(&self, name: &str) -> Vec<Value> {
        self.rows
            .iter()
            .filter_map(|row| row.get(name).cloned())
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleResult> {
        self.rows.iter()
    }

    /// Every row as an independent entry map
    pub fn result_list(&self) -> Vec<HashMap<String, Value>> {
        self.rows.iter().map(RuleResult::entry_map).collect()
    }

    pub fn rows(&self) -> &[RuleResult] {
        &self.rows
    }
}

impl FromIterator<RuleResult> for DecisionResult {
    fn from_iter<I: IntoIterator<Item = RuleResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DecisionResult {
    type Item = &'a RuleResult;
    type IntoIter = std::slice::Iter<'a, RuleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
