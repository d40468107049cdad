//! Built-in functions of the `expr` language

use crate::error::{Result, RuntimeError};
use decisio_core::Value;

/// Call a built-in function by name
pub(crate) fn call(name: &str, args: &[Value]) -> Result<Value> {
    match name {
        "sum" => {
            let numbers = numbers(name, args)?;
            Ok(Value::Number(numbers.iter().sum()))
        }
        "min" => Ok(numbers(name, args)?
            .into_iter()
            .reduce(f64::min)
            .map_or(Value::Null, Value::Number)),
        "max" => Ok(numbers(name, args)?
            .into_iter()
            .reduce(f64::max)
            .map_or(Value::Null, Value::Number)),
        "count" => Ok(Value::Number(
            spread(args).iter().filter(|v| !v.is_null()).count() as f64,
        )),
        "len" => match single(name, args)? {
            Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
            Value::Array(items) => Ok(Value::Number(items.len() as f64)),
            Value::Object(map) => Ok(Value::Number(map.len() as f64)),
            Value::Null => Ok(Value::Null),
            other => Err(type_error(name, other)),
        },
        "abs" => match single(name, args)? {
            Value::Number(n) => Ok(Value::Number(n.abs())),
            Value::Null => Ok(Value::Null),
            other => Err(type_error(name, other)),
        },
        "round" => {
            let (value, digits) = match args {
                [value] => (value, 0.0),
                [value, Value::Number(digits)] => (value, *digits),
                _ => return Err(arity_error(name, "1 or 2", args.len())),
            };
            match value {
                Value::Number(n) => {
                    let factor = 10f64.powi(digits as i32);
                    Ok(Value::Number((n * factor).round() / factor))
                }
                Value::Null => Ok(Value::Null),
                other => Err(type_error(name, other)),
            }
        }
        "upper" => match single(name, args)? {
            Value::String(s) => Ok(Value::String(s.to_uppercase())),
            Value::Null => Ok(Value::Null),
            other => Err(type_error(name, other)),
        },
        "lower" => match single(name, args)? {
            Value::String(s) => Ok(Value::String(s.to_lowercase())),
            Value::Null => Ok(Value::Null),
            other => Err(type_error(name, other)),
        },
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Unknown function: {}",
            name
        ))),
    }
}

/// A single list argument is spread into its elements
fn spread(args: &[Value]) -> &[Value] {
    match args {
        [Value::Array(items)] => items,
        _ => args,
    }
}

/// Numeric arguments with nulls skipped
fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>> {
    spread(args)
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.as_f64().ok_or_else(|| type_error(name, v)))
        .collect()
}

fn single<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(arity_error(name, "1", args.len())),
    }
}

fn type_error(name: &str, value: &Value) -> RuntimeError {
    RuntimeError::InvalidOperation(format!(
        "Function {} does not accept a value of type {}",
        name,
        value.type_name()
    ))
}

fn arity_error(name: &str, expected: &str, actual: usize) -> RuntimeError {
    RuntimeError::InvalidOperation(format!(
        "Function {} expects {} argument(s), got {}",
        name, expected, actual
    ))
}
