//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use decisio_sdk::{
    DecisionEngine, DecisionEngineBuilder, DecisionResult, DecisionTableResult, Value, Variables,
};
use std::io::Write;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` selects the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Test helper to evaluate decisions of an inline model
pub struct TestEngine {
    engine: DecisionEngine,
    model: String,
}

impl TestEngine {
    /// Create a test engine with default configuration
    pub fn new(model: &str) -> Self {
        Self::with_builder(DecisionEngineBuilder::new(), model)
    }

    /// Create a test engine from a configured builder
    pub fn with_builder(builder: DecisionEngineBuilder, model: &str) -> Self {
        init_tracing();
        Self {
            engine: builder.build().expect("Failed to build engine"),
            model: model.trim().to_string(),
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Evaluate a decision by key
    pub fn evaluate(&self, key: &str, variables: Variables) -> DecisionResult {
        self.engine
            .evaluate_decision_by_key(key, &self.model, &variables)
            .expect("Evaluation failed")
    }

    /// Evaluate a decision table by key
    pub fn evaluate_table(&self, key: &str, variables: Variables) -> DecisionTableResult {
        self.engine
            .evaluate_decision_table_by_key(key, &self.model, &variables)
            .expect("Evaluation failed")
    }

    /// Evaluate a decision by key, expecting a failure
    pub fn evaluate_err(&self, key: &str, variables: Variables) -> decisio_sdk::SdkError {
        self.engine
            .evaluate_decision_by_key(key, &self.model, &variables)
            .expect_err("Evaluation should fail")
    }

    /// Write the model to a temporary file
    pub fn write_model(&self) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(self.model.as_bytes())
            .expect("Failed to write temp file");
        file
    }
}

/// Helper to create input variables from key-value pairs
#[macro_export]
macro_rules! vars {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut variables = decisio_sdk::Variables::new();
        $(
            variables.insert($key, $value);
        )*
        variables
    }};
}

/// Assertion helpers for DecisionResult
pub trait ResultAssertions {
    fn assert_single_entry(&self, expected: impl Into<Value>);
    fn assert_entries(&self, name: &str, expected: Vec<Value>);
}

impl ResultAssertions for DecisionResult {
    fn assert_single_entry(&self, expected: impl Into<Value>) {
        let row = self
            .single_result()
            .expect("Expected at most one row")
            .expect("Expected one row");
        let entry = row
            .single_entry()
            .expect("Expected at most one entry")
            .expect("Expected one entry");
        assert_eq!(entry, &expected.into());
    }

    fn assert_entries(&self, name: &str, expected: Vec<Value>) {
        assert_eq!(self.collect_entries(name), expected);
    }
}

pub fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().map(|n| Value::Number(*n)).collect()
}

pub fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|s| Value::from(*s)).collect()
}
