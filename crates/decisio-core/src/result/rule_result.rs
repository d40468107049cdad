//! A single result row

use crate::error::{CoreError, Result};
use crate::types::{TypedValue, Value};
use std::collections::HashMap;

/// Ordered map of output name to typed value.
///
/// Entries keep insertion order, which is the declared output order of the
/// decision that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleResult {
    entries: Vec<(String, TypedValue)>,
}

impl RuleResult {
    /// Build a row from entries. A repeated name keeps its first position
    /// and takes the later value.
    pub fn new(entries: impl IntoIterator<Item = (String, TypedValue)>) -> Self {
        let mut row: Vec<(String, TypedValue)> = Vec::new();
        for (name, value) in entries {
            match row.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => row.push((name, value)),
            }
        }
        Self { entries: row }
    }

    /// A row with a single entry
    pub fn single(name: impl Into<String>, value: TypedValue) -> Self {
        Self {
            entries: vec![(name.into(), value)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Output names in order
    pub fn key_set(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Unwrapped value of an entry
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.get_typed(name).map(TypedValue::value)
    }

    pub fn get_typed(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Entries with unwrapped values, as an independent copy
    pub fn entry_map(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.value().clone()))
            .collect()
    }

    /// Entries in order with their typed values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn first_entry(&self) -> Option<&Value> {
        self.entries.first().map(|(_, value)| value.value())
    }

    pub fn first_entry_typed(&self) -> Option<&TypedValue> {
        self.entries.first().map(|(_, value)| value)
    }

    /// The only entry's value; fails when the row has several entries
    pub fn single_entry(&self) -> Result<Option<&Value>> {
        Ok(self.single_entry_typed()?.map(TypedValue::value))
    }

    pub fn single_entry_typed(&self) -> Result<Option<&TypedValue>> {
        match self.entries.len() {
            0 => Ok(None),
            1 => Ok(self.first_entry_typed()),
            _ => Err(CoreError::AmbiguousEntry {
                keys: self.key_set(),
            }),
        }
    }
}

impl FromIterator<(String, TypedValue)> for RuleResult {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        RuleResult::new(iter)
    }
}
