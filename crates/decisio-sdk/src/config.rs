//! Configuration types for DecisionEngine

use crate::error::{Result, SdkError};
use decisio_runtime::settings::{EXPR_LANGUAGE, UNARY_TESTS_LANGUAGE};
use decisio_runtime::EvaluationSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main engine configuration
///
/// Every field has a default, so a YAML file only lists what it changes:
///
/// ```yaml
/// default_input_entry_language: unary-tests
/// return_blank_table_output_as_null: true
/// enable_metrics: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Language of decision table input expressions
    pub default_input_expression_language: String,

    /// Language of decision table input entries (rule conditions)
    pub default_input_entry_language: String,

    /// Language of decision table output entries (rule conclusions)
    pub default_output_entry_language: String,

    /// Language of literal expressions
    pub default_literal_expression_language: String,

    /// Return blank output entries as null instead of omitting them
    pub return_blank_table_output_as_null: bool,

    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            default_input_expression_language: EXPR_LANGUAGE.to_string(),
            default_input_entry_language: UNARY_TESTS_LANGUAGE.to_string(),
            default_output_entry_language: EXPR_LANGUAGE.to_string(),
            default_literal_expression_language: EXPR_LANGUAGE.to_string(),
            return_blank_table_output_as_null: false,
            enable_metrics: true,
        }
    }

    /// Parse a configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SdkError::Config(format!("Invalid engine configuration: {}", e)))
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn with_default_input_expression_language(mut self, language: impl Into<String>) -> Self {
        self.default_input_expression_language = language.into();
        self
    }

    pub fn with_default_input_entry_language(mut self, language: impl Into<String>) -> Self {
        self.default_input_entry_language = language.into();
        self
    }

    pub fn with_default_output_entry_language(mut self, language: impl Into<String>) -> Self {
        self.default_output_entry_language = language.into();
        self
    }

    pub fn with_default_literal_expression_language(mut self, language: impl Into<String>) -> Self {
        self.default_literal_expression_language = language.into();
        self
    }

    /// Return blank output entries as null
    pub fn with_return_blank_table_output_as_null(mut self, enable: bool) -> Self {
        self.return_blank_table_output_as_null = enable;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Settings handed to the decision logic handlers
    pub fn evaluation_settings(&self) -> EvaluationSettings {
        EvaluationSettings {
            default_input_expression_language: self.default_input_expression_language.clone(),
            default_input_entry_language: self.default_input_entry_language.clone(),
            default_output_entry_language: self.default_output_entry_language.clone(),
            default_literal_expression_language: self.default_literal_expression_language.clone(),
            return_blank_table_output_as_null: self.return_blank_table_output_as_null,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
