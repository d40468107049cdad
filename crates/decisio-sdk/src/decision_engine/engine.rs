//! Core DecisionEngine implementation

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use decisio_core::{Decision, DecisionRequirementsGraph, DecisionResult, DecisionTableResult};
use decisio_parser::ModelTransformer;
use decisio_runtime::{DecisionContext, MetricCollector, VariableContext};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Parses decision models and evaluates their decisions.
///
/// The engine holds no per-call state; one engine and the decisions it
/// parsed can be shared between threads.
pub struct DecisionEngine {
    /// Configuration
    config: EngineConfig,

    /// Model transformer used by the parse entry points
    transformer: Arc<dyn ModelTransformer>,

    /// Handlers and listeners of every evaluation
    context: DecisionContext,

    /// Metrics collector
    metrics: Arc<MetricCollector>,
}

impl DecisionEngine {
    pub(crate) fn new(
        config: EngineConfig,
        transformer: Arc<dyn ModelTransformer>,
        context: DecisionContext,
        metrics: Arc<MetricCollector>,
    ) -> Self {
        Self {
            config,
            transformer,
            context,
            metrics,
        }
    }

    // ========== Parsing ==========

    /// Parse every decision of a model document
    pub fn parse_decisions(&self, source: &str) -> Result<Vec<Arc<Decision>>> {
        let decisions = self.transformer.transform_decisions(source)?;
        info!("Parsed {} decision(s)", decisions.len());
        Ok(decisions)
    }

    /// Parse a model document and return the decision with the key
    pub fn parse_decision(&self, key: &str, source: &str) -> Result<Arc<Decision>> {
        self.parse_decisions(source)?
            .into_iter()
            .find(|decision| decision.key == key)
            .ok_or_else(|| SdkError::DecisionNotFound(key.to_string()))
    }

    /// Parse a model document into its decision requirements graph
    pub fn parse_decision_requirements_graph(
        &self,
        source: &str,
    ) -> Result<DecisionRequirementsGraph> {
        Ok(self.transformer.transform_decision_requirements_graph(source)?)
    }

    /// Read and parse a model file
    pub fn parse_decisions_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<Arc<Decision>>> {
        let path = path.as_ref();
        debug!("Loading decisions from: {}", path.display());
        let source = std::fs::read_to_string(path)?;
        self.parse_decisions(&source)
    }

    // ========== Evaluation ==========

    /// Evaluate a decision and every decision it requires
    pub fn evaluate_decision(
        &self,
        decision: &Arc<Decision>,
        variables: &dyn VariableContext,
    ) -> Result<DecisionResult> {
        debug!("Evaluating decision '{}'", decision.key);
        Ok(self.context.evaluate_decision(decision, variables)?)
    }

    /// Evaluate a decision backed by a decision table
    pub fn evaluate_decision_table(
        &self,
        decision: &Arc<Decision>,
        variables: &dyn VariableContext,
    ) -> Result<DecisionTableResult> {
        if !decision.is_decision_table() {
            return Err(SdkError::NotADecisionTable {
                key: decision.key.clone(),
                kind: decision.kind().to_string(),
            });
        }
        let result = self.evaluate_decision(decision, variables)?;
        Ok(DecisionTableResult::wrap(&result))
    }

    /// Parse a model document and evaluate the decision with the key
    pub fn evaluate_decision_by_key(
        &self,
        key: &str,
        source: &str,
        variables: &dyn VariableContext,
    ) -> Result<DecisionResult> {
        let decision = self.parse_decision(key, source)?;
        self.evaluate_decision(&decision, variables)
    }

    /// Parse a model document and evaluate the decision table with the key
    pub fn evaluate_decision_table_by_key(
        &self,
        key: &str,
        source: &str,
        variables: &dyn VariableContext,
    ) -> Result<DecisionTableResult> {
        let decision = self.parse_decision(key, source)?;
        self.evaluate_decision_table(&decision, variables)
    }

    // ========== Accessors ==========

    /// Get metrics collector
    pub fn metrics(&self) -> Arc<MetricCollector> {
        self.metrics.clone()
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
