//! Local context of a decision table input

use super::VariableContext;
use decisio_core::{TypedValue, Value};

/// Variable holding the name of the current input variable
pub const INPUT_VARIABLE_NAME: &str = "inputVariableName";

/// Bindings layered over a parent context; local names shadow the parent
pub struct LocalContext<'a> {
    bindings: Vec<(String, TypedValue)>,
    parent: &'a dyn VariableContext,
}

impl<'a> LocalContext<'a> {
    pub fn new(parent: &'a dyn VariableContext) -> Self {
        Self {
            bindings: Vec::new(),
            parent,
        }
    }

    /// Bind an input value under its input variable name, and record that
    /// name under [`INPUT_VARIABLE_NAME`]
    pub fn for_input(
        parent: &'a dyn VariableContext,
        input_variable: &str,
        value: TypedValue,
    ) -> Self {
        Self::new(parent)
            .with(
                INPUT_VARIABLE_NAME,
                TypedValue::untyped(Value::String(input_variable.to_string())),
            )
            .with(input_variable, value)
    }

    pub fn with(mut self, name: impl Into<String>, value: TypedValue) -> Self {
        let name = name.into();
        self.bindings.retain(|(existing, _)| *existing != name);
        self.bindings.push((name, value));
        self
    }
}

impl VariableContext for LocalContext<'_> {
    fn resolve(&self, name: &str) -> Option<&TypedValue> {
        self.bindings
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .or_else(|| self.parent.resolve(name))
    }

    fn key_set(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.bindings.iter().map(|(key, _)| key.clone()).collect();
        for key in self.parent.key_set() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::VariableScope;

    #[test]
    fn test_local_binding_shadows_parent() {
        let mut scope = VariableScope::new();
        scope.set_value("cellInput", "outer");
        scope.set_value("season", "Winter");

        let local = LocalContext::for_input(
            &scope,
            "cellInput",
            TypedValue::untyped(Value::from("inner")),
        );

        assert_eq!(
            local.resolve("cellInput").map(TypedValue::value),
            Some(&Value::from("inner"))
        );
        assert_eq!(
            local.resolve(INPUT_VARIABLE_NAME).map(TypedValue::value),
            Some(&Value::from("cellInput"))
        );
        assert_eq!(
            local.resolve("season").map(TypedValue::value),
            Some(&Value::from("Winter"))
        );
        assert_eq!(
            local.key_set(),
            vec!["inputVariableName", "cellInput", "season"]
        );
    }
}
