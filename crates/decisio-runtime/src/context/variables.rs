//! Caller-supplied input variables

use super::{VariableContext, VariableScope};
use decisio_core::{TypedValue, Value};
use std::collections::HashMap;

/// Input variables of an evaluation call
///
/// ```
/// use decisio_runtime::Variables;
///
/// let variables = Variables::new()
///     .with("season", "Winter")
///     .with("guestCount", 4);
/// assert_eq!(variables.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Variables {
    inner: VariableScope,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untyped variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inner.set_value(name, value);
        self
    }

    /// Add a variable that already carries its type
    pub fn with_typed(mut self, name: impl Into<String>, value: TypedValue) -> Self {
        self.inner.set(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.inner.set_value(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.value(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl VariableContext for Variables {
    fn resolve(&self, name: &str) -> Option<&TypedValue> {
        self.inner.resolve(name)
    }

    fn key_set(&self) -> Vec<String> {
        self.inner.key_set()
    }
}

impl From<HashMap<String, Value>> for Variables {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut variables = Variables::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}
