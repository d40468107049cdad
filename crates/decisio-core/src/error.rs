//! Error types for Decisio Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A single-result accessor was used on a result with more than one row
    #[error("DMN-08001 Unable to get single decision result as it has more than one result: {count} results")]
    AmbiguousResult { count: usize },

    /// A single-entry accessor was used on a row with more than one entry
    #[error("DMN-08002 Unable to get single decision result entry as it has more than one entry: {keys:?}")]
    AmbiguousEntry { keys: Vec<String> },

    /// A value could not be transformed into the declared data type
    #[error("DMN-04001 Unable to transform value '{value}' of type '{actual}' to type '{target}'")]
    DataTypeTransform {
        value: String,
        actual: String,
        target: String,
    },

    /// A type definition names a data type that does not exist
    #[error("DMN-04002 Unknown data type '{0}'")]
    UnknownDataType(String),

    /// A hit policy or aggregator name could not be recognised
    #[error("DMN-02009 Unknown hit policy '{0}'")]
    UnknownHitPolicy(String),
}

impl CoreError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::AmbiguousResult { .. } => "DMN-08001",
            CoreError::AmbiguousEntry { .. } => "DMN-08002",
            CoreError::DataTypeTransform { .. } => "DMN-04001",
            CoreError::UnknownDataType(_) => "DMN-04002",
            CoreError::UnknownHitPolicy(_) => "DMN-02009",
        }
    }

    /// Returns true for errors raised by single-value accessors
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            CoreError::AmbiguousResult { .. } | CoreError::AmbiguousEntry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
