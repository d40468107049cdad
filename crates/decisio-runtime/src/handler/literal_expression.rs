//! Literal expression handler

use super::{unsupported, DecisionLogicHandler};
use crate::context::VariableContext;
use crate::error::Result;
use crate::event::{EvaluationDetail, EvaluationEvent, LiteralExpressionEvaluation};
use crate::expression::ExpressionLanguages;
use crate::settings::EvaluationSettings;
use decisio_core::{Decision, DecisionResult, RuleResult};
use std::sync::Arc;
use tracing::debug;

/// Evaluates a literal expression and types it by its output variable
pub struct LiteralExpressionHandler {
    settings: EvaluationSettings,
    languages: Arc<ExpressionLanguages>,
}

impl LiteralExpressionHandler {
    pub fn new(settings: EvaluationSettings, languages: Arc<ExpressionLanguages>) -> Self {
        Self {
            settings,
            languages,
        }
    }
}

impl DecisionLogicHandler for LiteralExpressionHandler {
    fn evaluate(
        &self,
        decision: &Arc<Decision>,
        context: &dyn VariableContext,
    ) -> Result<EvaluationEvent> {
        let literal = decision
            .as_literal_expression()
            .ok_or_else(|| unsupported(decision))?;

        let raw = self.languages.evaluate(
            &literal.expression,
            &self.settings.default_literal_expression_language,
            context,
        )?;
        let value = literal.variable.type_definition.transform(raw)?;
        debug!(
            "Literal expression '{}' evaluated to {}",
            decision.key, value
        );

        Ok(EvaluationEvent {
            decision: decision.clone(),
            executed_decision_elements: 1,
            detail: EvaluationDetail::LiteralExpression(LiteralExpressionEvaluation {
                output_name: literal.variable.name.clone(),
                output_value: value,
            }),
        })
    }

    fn generate_decision_result(&self, event: &EvaluationEvent) -> Result<DecisionResult> {
        let evaluation = event
            .as_literal_expression()
            .ok_or_else(|| unsupported(&event.decision))?;

        Ok(DecisionResult::new(vec![RuleResult::single(
            evaluation.output_name.clone(),
            evaluation.output_value.clone(),
        )]))
    }
}
