//! Parser error types

use decisio_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("DMN-02001 Unable to read model document: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A decision requires a decision that is not part of the model
    #[error("DMN-02002 Decision '{decision}' requires decision '{required}' which is not defined in the model")]
    MissingRequiredDecision { decision: String, required: String },

    /// Decision requirements form a loop
    #[error("DMN-02003 Loop detected in the requirements of decision '{decision}'")]
    RequirementLoop { decision: String },

    /// PRIORITY and OUTPUT ORDER tables must rank their outputs
    #[error("DMN-02004 Decision table '{decision}' with hit policy {hit_policy} needs at least one output with output values")]
    MissingOutputValues { decision: String, hit_policy: String },

    /// A rule has a different number of input entries than the table has inputs
    #[error("DMN-02005 Rule '{rule}' of decision '{decision}' has {actual} input entries but the table has {expected} inputs")]
    InputEntryCount {
        decision: String,
        rule: String,
        expected: usize,
        actual: usize,
    },

    /// A rule has a different number of output entries than the table has outputs
    #[error("DMN-02006 Rule '{rule}' of decision '{decision}' has {actual} output entries but the table has {expected} outputs")]
    OutputEntryCount {
        decision: String,
        rule: String,
        expected: usize,
        actual: usize,
    },

    /// An output of a compound output table has no name
    #[error("DMN-02007 Decision table '{decision}' has more than one output, so every output needs a name")]
    CompoundOutputWithoutName { decision: String },

    /// Two outputs of one table share a name
    #[error("DMN-02008 Decision table '{decision}' has more than one output named '{name}'")]
    DuplicateOutputName { decision: String, name: String },

    /// Core model error, e.g. unknown hit policy or data type
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Missing required field
    #[error("DMN-02010 Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("DMN-02011 Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Invalid expression syntax
    #[error("DMN-02012 Invalid expression syntax: {0}")]
    InvalidExpression(String),

    /// Two decisions share an id
    #[error("DMN-02013 Decision id '{0}' is defined more than once")]
    DuplicateDecision(String),

    /// A decision has neither a decision table nor a literal expression
    #[error("DMN-02014 Decision '{0}' has no decision logic")]
    MissingDecisionLogic(String),
}

impl ParseError {
    /// Stable identifier of this error kind
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::YamlError(_) => "DMN-02001",
            ParseError::MissingRequiredDecision { .. } => "DMN-02002",
            ParseError::RequirementLoop { .. } => "DMN-02003",
            ParseError::MissingOutputValues { .. } => "DMN-02004",
            ParseError::InputEntryCount { .. } => "DMN-02005",
            ParseError::OutputEntryCount { .. } => "DMN-02006",
            ParseError::CompoundOutputWithoutName { .. } => "DMN-02007",
            ParseError::DuplicateOutputName { .. } => "DMN-02008",
            ParseError::Core(err) => err.code(),
            ParseError::MissingField { .. } => "DMN-02010",
            ParseError::InvalidValue { .. } => "DMN-02011",
            ParseError::InvalidExpression(_) => "DMN-02012",
            ParseError::DuplicateDecision(_) => "DMN-02013",
            ParseError::MissingDecisionLogic(_) => "DMN-02014",
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
