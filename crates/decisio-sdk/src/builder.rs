//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::error::{Result, SdkError};
use decisio_core::LogicKind;
use decisio_parser::{ModelTransformer, YamlModelTransformer};
use decisio_runtime::{
    DecisionContext, DecisionEvaluationListener, DecisionLogicHandler,
    DecisionTableEvaluationListener, ExpressionLanguage, ExpressionLanguages, HandlerRegistry,
    MetricCollector,
};
use std::path::Path;
use std::sync::Arc;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,ignore
/// use decisio_sdk::{DecisionEngineBuilder, EngineConfig};
///
/// // Defaults: expr and unary-tests languages, metrics enabled
/// let engine = DecisionEngineBuilder::new().build()?;
///
/// // From a configuration file, with an audit listener
/// let engine = DecisionEngineBuilder::new()
///     .with_config_file("engine.yaml")?
///     .add_listener(Arc::new(AuditListener::default()))
///     .build()?;
/// ```
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    listeners: Vec<Arc<dyn DecisionEvaluationListener>>,
    table_listeners: Vec<Arc<dyn DecisionTableEvaluationListener>>,
    languages: Vec<Arc<dyn ExpressionLanguage>>,
    handlers: Vec<(LogicKind, Arc<dyn DecisionLogicHandler>)>,
    transformer: Option<Arc<dyn ModelTransformer>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            listeners: Vec::new(),
            table_listeners: Vec::new(),
            languages: Vec::new(),
            handlers: Vec::new(),
            transformer: None,
        }
    }

    // ========== Configuration ==========

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = EngineConfig::from_file(path)?;
        Ok(self)
    }

    pub fn default_input_expression_language(mut self, language: impl Into<String>) -> Self {
        self.config.default_input_expression_language = language.into();
        self
    }

    pub fn default_input_entry_language(mut self, language: impl Into<String>) -> Self {
        self.config.default_input_entry_language = language.into();
        self
    }

    pub fn default_output_entry_language(mut self, language: impl Into<String>) -> Self {
        self.config.default_output_entry_language = language.into();
        self
    }

    pub fn default_literal_expression_language(mut self, language: impl Into<String>) -> Self {
        self.config.default_literal_expression_language = language.into();
        self
    }

    /// Return blank output entries as null
    pub fn return_blank_table_output_as_null(mut self, enable: bool) -> Self {
        self.config.return_blank_table_output_as_null = enable;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    // ========== Plug-ins ==========

    /// Add a listener notified after every evaluation call
    pub fn add_listener(mut self, listener: Arc<dyn DecisionEvaluationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Add a listener notified after every decision table evaluation
    pub fn add_table_listener(
        mut self,
        listener: Arc<dyn DecisionTableEvaluationListener>,
    ) -> Self {
        self.table_listeners.push(listener);
        self
    }

    /// Register an expression language next to the built-in ones
    pub fn add_expression_language(mut self, language: Arc<dyn ExpressionLanguage>) -> Self {
        self.languages.push(language);
        self
    }

    /// Replace the handler of a decision logic kind
    pub fn with_handler(mut self, kind: LogicKind, handler: Arc<dyn DecisionLogicHandler>) -> Self {
        self.handlers.push((kind, handler));
        self
    }

    /// Replace the YAML model transformer
    pub fn with_model_transformer(mut self, transformer: Arc<dyn ModelTransformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Build the decision engine
    ///
    /// Fails if one of the configured default languages is not registered.
    pub fn build(self) -> Result<DecisionEngine> {
        let mut languages = ExpressionLanguages::with_defaults();
        for language in self.languages {
            languages.register(language);
        }

        for name in [
            &self.config.default_input_expression_language,
            &self.config.default_input_entry_language,
            &self.config.default_output_entry_language,
            &self.config.default_literal_expression_language,
        ] {
            if languages.get(name).is_none() {
                return Err(SdkError::Config(format!(
                    "Default expression language '{}' is not registered",
                    name
                )));
            }
        }

        let mut handlers = HandlerRegistry::with_defaults(
            self.config.evaluation_settings(),
            Arc::new(languages),
            self.table_listeners,
        );
        for (kind, handler) in self.handlers {
            handlers.register(kind, handler);
        }

        let metrics = Arc::new(MetricCollector::new());
        let mut listeners = self.listeners;
        if self.config.enable_metrics {
            listeners.insert(0, metrics.clone());
        }

        let transformer = self
            .transformer
            .unwrap_or_else(|| Arc::new(YamlModelTransformer::new()));

        tracing::debug!(
            "Built decision engine with {} listener(s), metrics {}",
            listeners.len(),
            if self.config.enable_metrics { "enabled" } else { "disabled" }
        );

        Ok(DecisionEngine::new(
            self.config,
            transformer,
            DecisionContext::new(Arc::new(handlers), listeners),
            metrics,
        ))
    }
}

impl Default for DecisionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
