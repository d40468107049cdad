//! The `unary-tests` expression language

use super::ExpressionLanguage;
use crate::context::{VariableContext, INPUT_VARIABLE_NAME};
use crate::engine::Evaluator;
use crate::settings::UNARY_TESTS_LANGUAGE;
use decisio_core::{DecisionExpression, DecisionTableInput, Value};
use decisio_parser::UnaryTestsParser;

/// Tests of a decision table input entry against the current input value.
///
/// The input variable is read from [`INPUT_VARIABLE_NAME`] in the context
/// and falls back to `cellInput`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnaryTestsLanguage;

impl ExpressionLanguage for UnaryTestsLanguage {
    fn name(&self) -> &str {
        UNARY_TESTS_LANGUAGE
    }

    fn evaluate(
        &self,
        expression: &DecisionExpression,
        context: &dyn VariableContext,
    ) -> anyhow::Result<Value> {
        let input_variable = context
            .resolve(INPUT_VARIABLE_NAME)
            .and_then(|name| name.value().as_str())
            .unwrap_or(DecisionTableInput::DEFAULT_INPUT_VARIABLE);

        let compiled = expression
            .compiled()
            .get_or_try_compile(|| UnaryTestsParser::parse(&expression.text, input_variable))?;
        Ok(Evaluator::evaluate(&compiled, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{LocalContext, VariableScope};
    use decisio_core::TypedValue;

    fn matches(test: &str, input: Value) -> bool {
        let scope = VariableScope::new();
        let local = LocalContext::for_input(&scope, "cellInput", TypedValue::untyped(input));
        UnaryTestsLanguage
            .evaluate(&DecisionExpression::new(test), &local)
            .unwrap()
            == Value::Bool(true)
    }

    #[test]
    fn test_unary_tests() {
        assert!(matches("-", Value::from("anything")));
        assert!(matches(r#""Winter""#, Value::from("Winter")));
        assert!(!matches(r#""Winter""#, Value::from("Summer")));
        assert!(matches("<= 8", Value::Number(8.0)));
        assert!(matches("[5..8]", Value::Number(6.0)));
        assert!(!matches("]5..8[", Value::Number(8.0)));
        assert!(matches(r#""Fall", "Winter""#, Value::from("Winter")));
        assert!(matches(r#"not("Fall", "Winter")"#, Value::from("Spring")));
    }

    #[test]
    fn test_custom_input_variable() {
        let mut scope = VariableScope::new();
        scope.set_value("limit", 10);
        let local = LocalContext::for_input(&scope, "m", TypedValue::untyped(Value::Number(3.0)));

        let result = UnaryTestsLanguage
            .evaluate(&DecisionExpression::new("< limit"), &local)
            .unwrap();
        assert_eq!(result, Value::Bool(true));
    }
}
