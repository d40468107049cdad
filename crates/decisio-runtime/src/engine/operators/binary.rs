//! Binary operator execution

use crate::error::{Result, RuntimeError};
use decisio_core::ast::Operator;
use decisio_core::Value;

/// Execute a non-comparison binary operation
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    // Null in any operation returns Null, so missing variables propagate
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null in binary operation: {} {} {}, returning null",
            left,
            op,
            right
        );
        return Ok(Value::Null);
    }

    match (left, op, right) {
        // Arithmetic operations
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }

        // String concatenation
        (Value::String(l), Operator::Add, Value::String(r)) => {
            Ok(Value::String(format!("{}{}", l, r)))
        }

        // Logical operations
        (Value::Bool(l), Operator::And, Value::Bool(r)) => Ok(Value::Bool(*l && *r)),
        (Value::Bool(l), Operator::Or, Value::Bool(r)) => Ok(Value::Bool(*l || *r)),

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => {
            Ok(Value::Bool(l.contains(r.as_str())))
        }
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }

        // Array operations
        (Value::Array(arr), Operator::Contains, val) => {
            Ok(Value::Bool(arr.iter().any(|v| v == val)))
        }
        (val, Operator::In, Value::Array(arr)) => Ok(Value::Bool(arr.iter().any(|v| v == val))),
        (val, Operator::NotIn, Value::Array(arr)) => {
            Ok(Value::Bool(!arr.iter().any(|v| v == val)))
        }

        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}
