//! Typed values
//!
//! A [`TypedValue`] pairs a runtime [`Value`] with the data type it was
//! produced as. Type definitions on decision table inputs and outputs and on
//! literal expression variables use [`ValueType::transform`] to coerce raw
//! expression results into their declared type.

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type tag of a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// No declared type; the value is passed through unchanged
    #[default]
    Untyped,
    String,
    Boolean,
    /// 32-bit integral number
    Integer,
    /// 64-bit integral number
    Long,
    Double,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Untyped => "untyped",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::Double => "double",
        }
    }

    /// Transform a raw value into this data type.
    ///
    /// Null always becomes an untyped null. Untyped definitions pass every
    /// value through.
    pub fn transform(&self, value: Value) -> Result<TypedValue> {
        if value.is_null() {
            return Ok(TypedValue::null());
        }

        match self {
            ValueType::Untyped => Ok(TypedValue::untyped(value)),
            ValueType::String => match value {
                Value::String(_) => Ok(TypedValue::new(value, ValueType::String)),
                Value::Bool(_) | Value::Number(_) => Ok(TypedValue::new(
                    Value::String(value.to_string()),
                    ValueType::String,
                )),
                other => Err(self.transform_error(&other)),
            },
            ValueType::Boolean => match &value {
                Value::Bool(_) => Ok(TypedValue::new(value, ValueType::Boolean)),
                Value::String(s) if s == "true" || s == "false" => Ok(TypedValue::new(
                    Value::Bool(s == "true"),
                    ValueType::Boolean,
                )),
                other => Err(self.transform_error(other)),
            },
            ValueType::Integer => match &value {
                Value::Number(n)
                    if value.is_integral()
                        && *n >= i32::MIN as f64
                        && *n <= i32::MAX as f64 =>
                {
                    Ok(TypedValue::new(value, ValueType::Integer))
                }
                Value::String(s) => s
                    .trim()
                    .parse::<i32>()
                    .map(|n| TypedValue::new(Value::Number(n as f64), ValueType::Integer))
                    .map_err(|_| self.transform_error(&value)),
                other => Err(self.transform_error(other)),
            },
            ValueType::Long => match &value {
                Value::Number(_) if value.is_integral() => {
                    Ok(TypedValue::new(value, ValueType::Long))
                }
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(|n| TypedValue::new(Value::Number(n as f64), ValueType::Long))
                    .map_err(|_| self.transform_error(&value)),
                other => Err(self.transform_error(other)),
            },
            ValueType::Double => match &value {
                Value::Number(_) => Ok(TypedValue::new(value, ValueType::Double)),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(|n| TypedValue::new(Value::Number(n), ValueType::Double))
                    .map_err(|_| self.transform_error(&value)),
                other => Err(self.transform_error(other)),
            },
        }
    }

    fn transform_error(&self, value: &Value) -> CoreError {
        CoreError::DataTypeTransform {
            value: value.to_string(),
            actual: value.type_name().to_string(),
            target: self.name().to_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ValueType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "untyped" => Ok(ValueType::Untyped),
            "string" => Ok(ValueType::String),
            "boolean" | "bool" => Ok(ValueType::Boolean),
            "integer" | "int" => Ok(ValueType::Integer),
            "long" => Ok(ValueType::Long),
            "double" | "number" => Ok(ValueType::Double),
            other => Err(CoreError::UnknownDataType(other.to_string())),
        }
    }
}

/// A value tagged with its data type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    value: Value,
    value_type: ValueType,
}

impl TypedValue {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self { value, value_type }
    }

    /// Wrap a value without a declared type
    pub fn untyped(value: Value) -> Self {
        Self::new(value, ValueType::Untyped)
    }

    /// Untyped null
    pub fn null() -> Self {
        Self::untyped(Value::Null)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        TypedValue::untyped(value)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
