//! Expression nodes of the decision model

use super::compiled::CompiledCell;
use crate::ast::Expression;

/// An expression attached to a decision model element.
///
/// Holds the source text, an optional expression language tag (the engine
/// default applies when absent) and the cached compiled form.
#[derive(Debug, Default)]
pub struct DecisionExpression {
    pub id: Option<String>,
    pub text: String,
    pub language: Option<String>,
    compiled: CompiledCell<Expression>,
}

impl DecisionExpression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            language: None,
            compiled: CompiledCell::new(),
        }
    }

    /// An expression without text (an empty table cell)
    pub fn blank() -> Self {
        Self::new("")
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns true if the expression has no meaningful text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The cache holding this node's compiled AST
    pub fn compiled(&self) -> &CompiledCell<Expression> {
        &self.compiled
    }
}
