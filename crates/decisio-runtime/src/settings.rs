//! Evaluation settings shared by the built-in handlers

/// Name of the built-in expression language
pub const EXPR_LANGUAGE: &str = "expr";

/// Name of the built-in unary tests language
pub const UNARY_TESTS_LANGUAGE: &str = "unary-tests";

/// Default languages and output behaviour of the decision logic handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSettings {
    pub default_input_expression_language: String,
    pub default_input_entry_language: String,
    pub default_output_entry_language: String,
    pub default_literal_expression_language: String,
    /// Blank output entries produce a null entry instead of no entry
    pub return_blank_table_output_as_null: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            default_input_expression_language: EXPR_LANGUAGE.to_string(),
            default_input_entry_language: UNARY_TESTS_LANGUAGE.to_string(),
            default_output_entry_language: EXPR_LANGUAGE.to_string(),
            default_literal_expression_language: EXPR_LANGUAGE.to_string(),
            return_blank_table_output_as_null: false,
        }
    }
}
