//! Decisio Decision Engine SDK
//!
//! High-level API for parsing decision models and evaluating decisions.
//!
//! ```
//! use decisio_sdk::{DecisionEngineBuilder, Variables};
//!
//! let engine = DecisionEngineBuilder::new().build().unwrap();
//! let model = r#"
//! decisions:
//!   - id: greeting
//!     literal_expression:
//!       variable: { name: greeting, type: string }
//!       text: '"Hello " + name'
//! "#;
//!
//! let result = engine
//!     .evaluate_decision_by_key("greeting", model, &Variables::new().with("name", "Ada"))
//!     .unwrap();
//! assert_eq!(
//!     result.single_result().unwrap().unwrap().get("greeting").unwrap().as_str(),
//!     Some("Hello Ada")
//! );
//! ```

pub mod builder;
pub mod config;
pub mod decision_engine;
pub mod error;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use decision_engine::DecisionEngine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use decisio_core::{
    Decision, DecisionRequirementsGraph, DecisionResult, DecisionTableResult, RuleResult,
    TypedValue, Value, ValueType,
};
pub use decisio_parser::{ModelTransformer, YamlModelTransformer};
pub use decisio_runtime::{
    DecisionEvaluationEvent, DecisionEvaluationListener, DecisionLogicHandler,
    DecisionTableEvaluation, DecisionTableEvaluationListener, ExpressionLanguage,
    MetricCollector, VariableContext, Variables,
};
