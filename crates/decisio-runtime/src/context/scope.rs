//! Per-call variable scope

use super::VariableContext;
use decisio_core::{TypedValue, Value};
use std::collections::HashMap;

/// Ordered, string-keyed map of typed values.
///
/// A scope is created for one evaluation call, seeded from the caller's
/// variables and enriched with the results of required decisions.
#[derive(Debug, Clone, Default)]
pub struct VariableScope {
    entries: Vec<(String, TypedValue)>,
    index: HashMap<String, usize>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every variable of a context into a fresh scope
    pub fn from_context(context: &dyn VariableContext) -> Self {
        let mut scope = Self::new();
        for name in context.key_set() {
            if let Some(value) = context.resolve(&name) {
                scope.set(name, value.clone());
            }
        }
        scope
    }

    /// Set a variable; an existing name keeps its position
    pub fn set(&mut self, name: impl Into<String>, value: TypedValue) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.set(name, TypedValue::untyped(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Unwrapped value of a variable
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(TypedValue::value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Variables with unwrapped values, as an independent copy
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.value().clone()))
            .collect()
    }
}

impl VariableContext for VariableScope {
    fn resolve(&self, name: &str) -> Option<&TypedValue> {
        self.get(name)
    }

    fn key_set(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }
}
