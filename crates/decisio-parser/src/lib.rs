//! Decisio Parser - turns model documents and expression text into the
//! Decisio decision model
//!
//! This crate provides:
//! - The [`ModelTransformer`] seam and its YAML implementation
//! - The expression parser used by the built-in `expr` language
//! - The unary-tests compiler used for decision table input entries

pub mod decision_parser;
pub mod error;
pub mod expression_parser;
pub mod model_transformer;
pub mod unary_tests_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use model_transformer::{ModelTransformer, YamlModelTransformer};
pub use unary_tests_parser::UnaryTestsParser;
pub use yaml_parser::YamlParser;
