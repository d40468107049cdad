//! Variable contexts
//!
//! Expressions read variables through [`VariableContext`]. Three contexts
//! exist: the caller's [`Variables`], the per-call [`VariableScope`] and the
//! [`LocalContext`] that binds a decision table input value over a parent.

mod local;
mod scope;
mod variables;

pub use local::{LocalContext, INPUT_VARIABLE_NAME};
pub use scope::VariableScope;
pub use variables::Variables;

use decisio_core::TypedValue;

/// Read-only view of named typed values
pub trait VariableContext {
    /// Look up a variable by name
    fn resolve(&self, name: &str) -> Option<&TypedValue>;

    /// Names of every variable visible in this context
    fn key_set(&self) -> Vec<String>;

    fn contains_variable(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}
