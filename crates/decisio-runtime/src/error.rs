//! Runtime error types

use decisio_core::CoreError;
use thiserror::Error;

/// Boxed error raised by a caller-supplied plug-in
pub type PluginError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// No handler is registered for the decision's logic
    #[error("DMN-01002 Unable to evaluate decision '{decision}': no handler registered for decision logic '{kind}'")]
    UnsupportedLogicType { decision: String, kind: String },

    /// A decision (transitively) requires itself
    #[error("DMN-01004 Decision '{key}' requires itself")]
    CyclicDependency { key: String },

    /// A decision evaluation listener failed
    #[error("DMN-01005 Decision evaluation listener failed: {source}")]
    ListenerFailure {
        #[source]
        source: PluginError,
    },

    /// An expression could not be evaluated
    #[error("DMN-05001 Unable to evaluate expression for language '{language}': '{expression}': {source}")]
    EvaluationFailure {
        language: String,
        expression: String,
        #[source]
        source: PluginError,
    },

    /// No expression language is registered under the name
    #[error("DMN-05002 Unknown expression language '{0}'")]
    UnknownExpressionLanguage(String),

    /// Operator applied to unsupported operands
    #[error("DMN-05003 Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("DMN-05004 Division by zero")]
    DivisionByZero,

    /// UNIQUE table matched more than one rule
    #[error("DMN-03001 Hit policy UNIQUE of decision '{decision}' only allows a single rule to match, but rules {rules:?} matched")]
    UniqueViolation { decision: String, rules: Vec<String> },

    /// ANY table matched rules with different outputs
    #[error("DMN-03002 Hit policy ANY of decision '{decision}' only allows multiple matching rules with equal outputs, but rules {rules:?} differ")]
    AnyViolation { decision: String, rules: Vec<String> },

    /// Aggregation over a rule with more than one output
    #[error("DMN-03003 Unable to apply aggregation {aggregator} of decision '{decision}' on a compound output")]
    AggregationOnCompoundOutput { decision: String, aggregator: String },

    /// Aggregation over values that are not numbers
    #[error("DMN-03004 Unable to apply aggregation {aggregator} of decision '{decision}' on value '{value}' of type '{value_type}'")]
    NonNumericAggregation {
        decision: String,
        aggregator: String,
        value: String,
        value_type: String,
    },

    /// PRIORITY and OUTPUT ORDER need at least one matching rule
    #[error("DMN-03005 Hit policy {hit_policy} of decision '{decision}' requires at least one matching rule")]
    NoMatchingRule { decision: String, hit_policy: String },

    /// A matched output value is not one of the declared output values
    #[error("DMN-03006 Value '{value}' of output '{output}' of decision '{decision}' is not one of the output values {allowed:?}")]
    OutputValueNotAllowed {
        decision: String,
        output: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Core error, e.g. data type transform
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl RuntimeError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::UnsupportedLogicType { .. } => "DMN-01002",
            RuntimeError::CyclicDependency { .. } => "DMN-01004",
            RuntimeError::ListenerFailure { .. } => "DMN-01005",
            RuntimeError::EvaluationFailure { .. } => "DMN-05001",
            RuntimeError::UnknownExpressionLanguage(_) => "DMN-05002",
            RuntimeError::InvalidOperation(_) => "DMN-05003",
            RuntimeError::DivisionByZero => "DMN-05004",
            RuntimeError::UniqueViolation { .. } => "DMN-03001",
            RuntimeError::AnyViolation { .. } => "DMN-03002",
            RuntimeError::AggregationOnCompoundOutput { .. } => "DMN-03003",
            RuntimeError::NonNumericAggregation { .. } => "DMN-03004",
            RuntimeError::NoMatchingRule { .. } => "DMN-03005",
            RuntimeError::OutputValueNotAllowed { .. } => "DMN-03006",
            RuntimeError::Core(err) => err.code(),
        }
    }

    /// Wrap a listener error
    pub fn listener_failure(error: anyhow::Error) -> Self {
        RuntimeError::ListenerFailure {
            source: error.into(),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
