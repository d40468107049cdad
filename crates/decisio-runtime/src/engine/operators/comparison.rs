//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use decisio_core::ast::Operator;
use decisio_core::Value;
use std::cmp::Ordering;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    // equality is structural for every pair of values, null included
    match op {
        Operator::Eq => return Ok(left == right),
        Operator::Ne => return Ok(left != right),
        _ => {}
    }

    // Null ordered against anything is false, so missing inputs match no range
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null comparison: {} {} {}, returning false",
            left,
            op,
            right
        );
        return Ok(false);
    }

    let ordering = match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => {
            return Err(RuntimeError::InvalidOperation(format!(
                "Cannot compare {} and {} with {}",
                left.type_name(),
                right.type_name(),
                op
            )))
        }
    };

    let Some(ordering) = ordering else {
        return Ok(false);
    };

    match op {
        Operator::Gt => Ok(ordering == Ordering::Greater),
        Operator::Ge => Ok(ordering != Ordering::Less),
        Operator::Lt => Ok(ordering == Ordering::Less),
        Operator::Le => Ok(ordering != Ordering::Greater),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "{} is not a comparison operator",
            op
        ))),
    }
}
