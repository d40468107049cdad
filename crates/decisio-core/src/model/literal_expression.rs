//! Literal expression decision logic

use super::expression::DecisionExpression;
use crate::types::ValueType;

/// Output variable of a literal expression
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionVariable {
    pub name: String,
    pub type_definition: ValueType,
}

impl DecisionVariable {
    pub fn new(name: impl Into<String>, type_definition: ValueType) -> Self {
        Self {
            name: name.into(),
            type_definition,
        }
    }
}

/// A decision whose logic is a single expression producing one variable
#[derive(Debug)]
pub struct LiteralExpression {
    pub variable: DecisionVariable,
    pub expression: DecisionExpression,
}

impl LiteralExpression {
    pub fn new(variable: DecisionVariable, expression: DecisionExpression) -> Self {
        Self {
            variable,
            expression,
        }
    }
}
