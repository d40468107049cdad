//! Type system for Decisio
//!
//! This module contains the runtime type system including:
//! - Value types
//! - Typed values and data type transformation

pub mod typed_value;
pub mod value;

pub use typed_value::{TypedValue, ValueType};
pub use value::Value;
