//! The `expr` expression language

use super::ExpressionLanguage;
use crate::context::VariableContext;
use crate::engine::Evaluator;
use crate::settings::EXPR_LANGUAGE;
use decisio_core::{DecisionExpression, Value};
use decisio_parser::ExpressionParser;

/// Full expressions: arithmetic, comparisons, logic, field access and
/// built-in functions
#[derive(Debug, Default, Clone, Copy)]
pub struct ExprLanguage;

impl ExpressionLanguage for ExprLanguage {
    fn name(&self) -> &str {
        EXPR_LANGUAGE
    }

    fn evaluate(
        &self,
        expression: &DecisionExpression,
        context: &dyn VariableContext,
    ) -> anyhow::Result<Value> {
        let compiled = expression
            .compiled()
            .get_or_try_compile(|| ExpressionParser::parse(&expression.text))?;
        Ok(Evaluator::evaluate(&compiled, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Variables;

    #[test]
    fn test_compiles_once_and_reuses() {
        let expression = DecisionExpression::new("adults + children");
        let language = ExprLanguage;

        let first = Variables::new().with("adults", 2).with("children", 1);
        assert_eq!(
            language.evaluate(&expression, &first).unwrap(),
            Value::Number(3.0)
        );
        assert!(expression.compiled().is_compiled());

        let second = Variables::new().with("adults", 4).with("children", 0);
        assert_eq!(
            language.evaluate(&expression, &second).unwrap(),
            Value::Number(4.0)
        );
    }

    #[test]
    fn test_parse_error_leaves_cell_empty() {
        let expression = DecisionExpression::new("1 +");
        assert!(ExprLanguage.evaluate(&expression, &Variables::new()).is_err());
        assert!(!expression.compiled().is_compiled());
    }
}
