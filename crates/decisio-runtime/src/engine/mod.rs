//! Expression evaluator
//!
//! Evaluates compiled expression ASTs against a variable context.

mod functions;
pub(crate) mod operators;

use crate::context::VariableContext;
use crate::error::Result;
use decisio_core::ast::{Expression, Operator};
use decisio_core::Value;
use operators::{execute_binary_op, execute_compare, execute_unary_op};

/// Tree-walking evaluator for [`Expression`]
pub struct Evaluator;

impl Evaluator {
    /// Evaluate an expression. Unknown variables and missing fields
    /// evaluate to null.
    pub fn evaluate(expression: &Expression, context: &dyn VariableContext) -> Result<Value> {
        match expression {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::FieldAccess(path) => Ok(Self::load_field(path, context)),

            Expression::List(items) => items
                .iter()
                .map(|item| Self::evaluate(item, context))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),

            Expression::Binary { left, op, right } => {
                let left = Self::evaluate(left, context)?;

                // short-circuit logical operators
                match (op, &left) {
                    (Operator::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
                    (Operator::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
                    _ => {}
                }

                let right = Self::evaluate(right, context)?;
                if op.is_comparison() {
                    execute_compare(&left, op, &right).map(Value::Bool)
                } else {
                    execute_binary_op(&left, op, &right)
                }
            }

            Expression::Unary { op, operand } => {
                let value = Self::evaluate(operand, context)?;
                execute_unary_op(&value, op)
            }

            Expression::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| Self::evaluate(arg, context))
                    .collect::<Result<Vec<_>>>()?;
                functions::call(name, &args)
            }
        }
    }

    fn load_field(path: &[String], context: &dyn VariableContext) -> Value {
        let Some((first, rest)) = path.split_first() else {
            return Value::Null;
        };

        let Some(root) = context.resolve(first) else {
            tracing::debug!("Variable '{}' not found, using null", first);
            return Value::Null;
        };

        let mut current = root.value();
        for field in rest {
            match current.field(field) {
                Some(value) => current = value,
                None => return Value::Null,
            }
        }
        current.clone()
    }
}
