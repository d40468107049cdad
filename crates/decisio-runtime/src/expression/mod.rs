//! Expression languages
//!
//! Every expression of a decision model is evaluated by a named
//! [`ExpressionLanguage`]. The node's own language tag wins; otherwise the
//! handler passes the default language configured for that kind of node.

mod expr_language;
mod unary_tests_language;

pub use expr_language::ExprLanguage;
pub use unary_tests_language::UnaryTestsLanguage;

use crate::context::VariableContext;
use crate::error::{Result, RuntimeError};
use decisio_core::{DecisionExpression, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// An expression language evaluating decision model expressions
pub trait ExpressionLanguage: Send + Sync {
    /// Name the language is registered under
    fn name(&self) -> &str;

    /// Evaluate an expression node against a variable context.
    ///
    /// Implementations may cache compiled forms in the node's
    /// [`DecisionExpression::compiled`] cell.
    fn evaluate(
        &self,
        expression: &DecisionExpression,
        context: &dyn VariableContext,
    ) -> anyhow::Result<Value>;
}

/// Registry of expression languages, keyed by lowercase name
#[derive(Clone, Default)]
pub struct ExpressionLanguages {
    languages: HashMap<String, Arc<dyn ExpressionLanguage>>,
}

impl ExpressionLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `expr` and `unary-tests` languages
    pub fn with_defaults() -> Self {
        let mut languages = Self::new();
        languages.register(Arc::new(ExprLanguage));
        languages.register(Arc::new(UnaryTestsLanguage));
        languages
    }

    /// Register a language, replacing one with the same name
    pub fn register(&mut self, language: Arc<dyn ExpressionLanguage>) {
        self.languages
            .insert(language.name().to_ascii_lowercase(), language);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ExpressionLanguage>> {
        self.languages.get(&name.to_ascii_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluate an expression with its own language, or `default_language`
    pub fn evaluate(
        &self,
        expression: &DecisionExpression,
        default_language: &str,
        context: &dyn VariableContext,
    ) -> Result<Value> {
        let name = expression
            .language
            .as_deref()
            .filter(|language| !language.trim().is_empty())
            .unwrap_or(default_language);

        let language = self
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownExpressionLanguage(name.to_string()))?;

        language
            .evaluate(expression, context)
            .map_err(|source| RuntimeError::EvaluationFailure {
                language: name.to_string(),
                expression: expression.text.clone(),
                source: source.into(),
            })
    }
}

impl std::fmt::Debug for ExpressionLanguages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionLanguages")
            .field("languages", &self.names())
            .finish()
    }
}
