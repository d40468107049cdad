//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// No decision with the key exists in the model
    #[error("DMN-01001 Unable to find decision with id '{0}' in model.")]
    DecisionNotFound(String),

    /// The decision is not backed by a decision table
    #[error("DMN-01003 Unable to evaluate decision '{key}' as a decision table, its logic is {kind}")]
    NotADecisionTable { key: String, kind: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parser error
    #[error("{0}")]
    Parse(#[from] decisio_parser::ParseError),

    /// Runtime error
    #[error("{0}")]
    Runtime(#[from] decisio_runtime::RuntimeError),

    /// Core error
    #[error("{0}")]
    Core(#[from] decisio_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            SdkError::DecisionNotFound(_) => "DMN-01001",
            SdkError::NotADecisionTable { .. } => "DMN-01003",
            SdkError::Config(_) => "DMN-09001",
            SdkError::Parse(err) => err.code(),
            SdkError::Runtime(err) => err.code(),
            SdkError::Core(err) => err.code(),
            SdkError::Io(_) => "DMN-09002",
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_not_found_message() {
        let error = SdkError::DecisionNotFound("dish".to_string());
        assert_eq!(
            error.to_string(),
            "DMN-01001 Unable to find decision with id 'dish' in model."
        );
        assert_eq!(error.code(), "DMN-01001");
    }

    #[test]
    fn test_wrapped_errors_keep_codes() {
        let error = SdkError::from(decisio_runtime::RuntimeError::CyclicDependency {
            key: "a".to_string(),
        });
        assert_eq!(error.code(), "DMN-01004");
        assert!(error.to_string().starts_with("DMN-01004"));

        let error = SdkError::from(decisio_core::CoreError::AmbiguousResult { count: 3 });
        assert_eq!(error.code(), "DMN-08001");
    }

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("Invalid configuration".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));
    }
}
