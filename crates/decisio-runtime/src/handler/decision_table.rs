//! Decision table handler

use super::{hit_policy, unsupported, DecisionLogicHandler};
use crate::context::{LocalContext, VariableContext};
use crate::error::{Result, RuntimeError};
use crate::event::{
    DecisionTableEvaluation, EvaluatedInput, EvaluatedOutput, EvaluatedRule, EvaluationDetail,
    EvaluationEvent,
};
use crate::expression::ExpressionLanguages;
use crate::observability::DecisionTableEvaluationListener;
use crate::settings::EvaluationSettings;
use decisio_core::{
    Decision, DecisionExpression, DecisionResult, DecisionTable, DecisionTableInput, RuleResult,
    TypedValue, Value,
};
use std::sync::Arc;
use tracing::debug;

/// Evaluates decision tables: input values, rule matching, output entries
/// and the hit policy
pub struct DecisionTableHandler {
    settings: EvaluationSettings,
    languages: Arc<ExpressionLanguages>,
    listeners: Vec<Arc<dyn DecisionTableEvaluationListener>>,
}

impl DecisionTableHandler {
    pub fn new(
        settings: EvaluationSettings,
        languages: Arc<ExpressionLanguages>,
        listeners: Vec<Arc<dyn DecisionTableEvaluationListener>>,
    ) -> Self {
        Self {
            settings,
            languages,
            listeners,
        }
    }

    fn evaluate_input(
        &self,
        input: &DecisionTableInput,
        context: &dyn VariableContext,
    ) -> Result<TypedValue> {
        match &input.expression {
            Some(expression) if !expression.is_blank() => {
                let raw = self.languages.evaluate(
                    expression,
                    &self.settings.default_input_expression_language,
                    context,
                )?;
                Ok(input.type_definition.transform(raw)?)
            }
            _ => Ok(TypedValue::null()),
        }
    }

    /// A blank condition matches; otherwise the condition must be `true`
    fn is_applicable(
        &self,
        condition: Option<&DecisionExpression>,
        context: &dyn VariableContext,
    ) -> Result<bool> {
        match condition {
            Some(condition) if !condition.is_blank() => {
                let result = self.languages.evaluate(
                    condition,
                    &self.settings.default_input_entry_language,
                    context,
                )?;
                Ok(result == Value::Bool(true))
            }
            _ => Ok(true),
        }
    }

    fn evaluate_outputs(
        &self,
        table: &DecisionTable,
        index: usize,
        context: &dyn VariableContext,
    ) -> Result<EvaluatedRule> {
        let rule = &table.rules[index];
        let mut outputs = Vec::with_capacity(table.outputs.len());

        for (position, output) in table.outputs.iter().enumerate() {
            let value = match rule.conclusions.get(position) {
                Some(conclusion) if !conclusion.is_blank() => {
                    let raw = self.languages.evaluate(
                        conclusion,
                        &self.settings.default_output_entry_language,
                        context,
                    )?;
                    output.type_definition.transform(raw)?
                }
                _ if self.settings.return_blank_table_output_as_null => TypedValue::null(),
                _ => continue,
            };

            outputs.push(EvaluatedOutput {
                id: output.id.clone(),
                name: output.result_name().to_string(),
                value,
            });
        }

        Ok(EvaluatedRule {
            id: rule.id.clone(),
            index,
            outputs,
        })
    }

    fn notify_listeners(&self, evaluation: &DecisionTableEvaluation) -> Result<()> {
        for listener in &self.listeners {
            listener
                .notify(evaluation)
                .map_err(RuntimeError::listener_failure)?;
        }
        Ok(())
    }
}

impl DecisionLogicHandler for DecisionTableHandler {
    fn evaluate(
        &self,
        decision: &Arc<Decision>,
        context: &dyn VariableContext,
    ) -> Result<EvaluationEvent> {
        let table = decision
            .as_decision_table()
            .ok_or_else(|| unsupported(decision))?;

        let mut evaluation =
            DecisionTableEvaluation::new(decision.key.clone(), table.hit_policy.to_string());
        evaluation.executed_decision_elements = table.element_count();

        let mut matching: Vec<usize> = (0..table.rules.len()).collect();
        for (position, input) in table.inputs.iter().enumerate() {
            let value = self.evaluate_input(input, context)?;

            evaluation.inputs.push(EvaluatedInput {
                id: input.id.clone(),
                label: input.label.clone(),
                expression: input.expression.as_ref().map(|e| e.text.clone()),
                value: value.clone(),
            });

            let local = match &input.expression {
                Some(expression) if !expression.is_blank() => {
                    LocalContext::for_input(context, &input.input_variable, value)
                }
                _ => LocalContext::new(context),
            };

            let mut still_matching = Vec::with_capacity(matching.len());
            for index in matching {
                let condition = table.rules[index].conditions.get(position);
                if self.is_applicable(condition, &local)? {
                    still_matching.push(index);
                }
            }
            matching = still_matching;
        }

        for index in matching {
            let rule = self.evaluate_outputs(table, index, context)?;
            evaluation.matching_rules.push(rule);
        }

        hit_policy::apply(&table.hit_policy, &table.outputs, &mut evaluation)?;
        debug!(
            "Decision table '{}' ({}) matched {} rule(s)",
            decision.key,
            evaluation.hit_policy,
            evaluation.matching_rules.len()
        );

        self.notify_listeners(&evaluation)?;

        Ok(EvaluationEvent {
            decision: decision.clone(),
            executed_decision_elements: evaluation.executed_decision_elements,
            detail: EvaluationDetail::DecisionTable(evaluation),
        })
    }

    fn generate_decision_result(&self, event: &EvaluationEvent) -> Result<DecisionResult> {
        let evaluation = event
            .as_decision_table()
            .ok_or_else(|| unsupported(&event.decision))?;

        if let (Some(name), Some(value)) = (
            &evaluation.collect_result_name,
            &evaluation.collect_result_value,
        ) {
            return Ok(DecisionResult::new(vec![RuleResult::single(
                name.clone(),
                value.clone(),
            )]));
        }

        Ok(evaluation
            .matching_rules
            .iter()
            .map(|rule| {
                RuleResult::new(
                    rule.outputs
                        .iter()
                        .map(|output| (output.name.clone(), output.value.clone())),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Variables;
    use decisio_core::{
        BuiltinAggregator, DecisionTableOutput, DecisionTableRule, HitPolicy, HitPolicyEntry,
        ValueType,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<DecisionTableEvaluation>>,
    }

    impl DecisionTableEvaluationListener for RecordingListener {
        fn notify(&self, evaluation: &DecisionTableEvaluation) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(evaluation.clone());
            Ok(())
        }
    }

    fn handler_with(
        settings: EvaluationSettings,
        listeners: Vec<Arc<dyn DecisionTableEvaluationListener>>,
    ) -> DecisionTableHandler {
        DecisionTableHandler::new(
            settings,
            Arc::new(ExpressionLanguages::with_defaults()),
            listeners,
        )
    }

    fn handler() -> DecisionTableHandler {
        handler_with(EvaluationSettings::default(), Vec::new())
    }

    fn rule(id: &str, conditions: &[&str], conclusions: &[&str]) -> DecisionTableRule {
        DecisionTableRule::new(
            conditions.iter().map(|c| DecisionExpression::new(*c)).collect(),
            conclusions.iter().map(|c| DecisionExpression::new(*c)).collect(),
        )
        .with_id(id)
    }

    fn season_table(hit_policy: HitPolicyEntry) -> Arc<Decision> {
        let table = DecisionTable::new(hit_policy)
            .with_input(DecisionTableInput::new(DecisionExpression::new("month")))
            .with_output(DecisionTableOutput::new("season").with_type(ValueType::String))
            .with_rule(rule("winter", &["<= 2"], &[r#""Winter""#]))
            .with_rule(rule("spring", &["[3..5]"], &[r#""Spring""#]))
            .with_rule(rule("summer", &["[6..8]"], &[r#""Summer""#]))
            .with_rule(rule("fall", &["[9..11]"], &[r#""Fall""#]))
            .with_rule(rule("december", &["12"], &[r#""Winter""#]));
        Arc::new(Decision::decision_table("season", table))
    }

    fn evaluate(
        handler: &DecisionTableHandler,
        decision: &Arc<Decision>,
        variables: &Variables,
    ) -> Result<DecisionResult> {
        let event = handler.evaluate(decision, variables)?;
        handler.generate_decision_result(&event)
    }

    #[test]
    fn test_unique_match() {
        let decision = season_table(HitPolicyEntry::default());
        let result = evaluate(&handler(), &decision, &Variables::new().with("month", 4)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.first_result().and_then(|row| row.get("season")),
            Some(&Value::from("Spring"))
        );
    }

    #[test]
    fn test_no_match_gives_empty_result() {
        let decision = season_table(HitPolicyEntry::default());
        let result = evaluate(&handler(), &decision, &Variables::new().with("month", 13)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_executed_elements_and_inputs() {
        let decision = season_table(HitPolicyEntry::default());
        let event = handler()
            .evaluate(&decision, &Variables::new().with("month", 12))
            .unwrap();

        // (1 input + 1 output) * 5 rules
        assert_eq!(event.executed_decision_elements, 10);
        let evaluation = event.as_decision_table().unwrap();
        assert_eq!(evaluation.inputs[0].value.value(), &Value::Number(12.0));
        assert_eq!(evaluation.matching_rules[0].id.as_deref(), Some("december"));
    }

    #[test]
    fn test_collect_rows_and_count() {
        let table = |hit_policy| {
            let table = DecisionTable::new(hit_policy)
                .with_input(DecisionTableInput::new(DecisionExpression::new("amount")))
                .with_output(DecisionTableOutput::new("flag"))
                .with_rule(rule("r1", &["> 100"], &["1"]))
                .with_rule(rule("r2", &["> 1000"], &["2"]))
                .with_rule(rule("r3", &["< 0"], &["3"]));
            Arc::new(Decision::decision_table("flags", table))
        };
        let variables = Variables::new().with("amount", 5000);

        let rows = evaluate(&handler(), &table(HitPolicyEntry::new(HitPolicy::Collect)), &variables)
            .unwrap();
        assert_eq!(
            rows.collect_entries("flag"),
            vec![Value::Number(1.0), Value::Number(2.0)]
        );

        let count = evaluate(
            &handler(),
            &table(HitPolicyEntry::collect(BuiltinAggregator::Count)),
            &variables,
        )
        .unwrap();
        assert_eq!(count.len(), 1);
        assert_eq!(
            count.single_result().unwrap().unwrap().get("flag"),
            Some(&Value::Number(2.0))
        );
    }

    #[test]
    fn test_blank_outputs() {
        let table = DecisionTable::new(HitPolicyEntry::default())
            .with_input(DecisionTableInput::new(DecisionExpression::new("x")))
            .with_output(DecisionTableOutput::new("a"))
            .with_output(DecisionTableOutput::new("b"))
            .with_rule(rule("r1", &["-"], &["1", ""]));
        let decision = Arc::new(Decision::decision_table("blank", table));
        let variables = Variables::new().with("x", 1);

        let result = evaluate(&handler(), &decision, &variables).unwrap();
        assert_eq!(result.first_result().unwrap().key_set(), vec!["a"]);

        let settings = EvaluationSettings {
            return_blank_table_output_as_null: true,
            ..Default::default()
        };
        let result = evaluate(&handler_with(settings, Vec::new()), &decision, &variables).unwrap();
        let row = result.first_result().unwrap();
        assert_eq!(row.key_set(), vec!["a", "b"]);
        assert_eq!(row.get("b"), Some(&Value::Null));
    }

    #[test]
    fn test_input_without_expression_is_null() {
        let mut input = DecisionTableInput::new(DecisionExpression::blank());
        input.expression = None;
        let table = DecisionTable::new(HitPolicyEntry::new(HitPolicy::First))
            .with_input(input)
            .with_output(DecisionTableOutput::new("out"))
            .with_rule(rule("r1", &["1"], &["1"]))
            .with_rule(rule("r2", &["-"], &["2"]));
        let decision = Arc::new(Decision::decision_table("t", table));

        let event = handler().evaluate(&decision, &Variables::new()).unwrap();
        let evaluation = event.as_decision_table().unwrap();
        assert!(evaluation.inputs[0].value.is_null());
        assert_eq!(evaluation.matching_rules[0].id.as_deref(), Some("r2"));
    }

    #[test]
    fn test_unique_violation() {
        let table = DecisionTable::new(HitPolicyEntry::default())
            .with_input(DecisionTableInput::new(DecisionExpression::new("x")))
            .with_output(DecisionTableOutput::new("out"))
            .with_rule(rule("r1", &["> 0"], &["1"]))
            .with_rule(rule("r2", &["> 1"], &["2"]));
        let decision = Arc::new(Decision::decision_table("t", table));

        let err = evaluate(&handler(), &decision, &Variables::new().with("x", 5)).unwrap_err();
        assert_eq!(err.code(), "DMN-03001");
    }

    #[test]
    fn test_listeners_see_table_evaluation() {
        let listener = Arc::new(RecordingListener::default());
        let handler = handler_with(
            EvaluationSettings::default(),
            vec![listener.clone() as Arc<dyn DecisionTableEvaluationListener>],
        );
        let decision = season_table(HitPolicyEntry::default());

        evaluate(&handler, &decision, &Variables::new().with("month", 7)).unwrap();

        let seen = listener.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].decision_key, "season");
        assert_eq!(seen[0].matching_rules[0].id.as_deref(), Some("summer"));
    }

    #[test]
    fn test_invalid_condition_fails() {
        let table = DecisionTable::new(HitPolicyEntry::default())
            .with_input(DecisionTableInput::new(DecisionExpression::new("x")))
            .with_output(DecisionTableOutput::new("out"))
            .with_rule(rule("r1", &["[1..]"], &["1"]));
        let decision = Arc::new(Decision::decision_table("t", table));

        let err = evaluate(&handler(), &decision, &Variables::new().with("x", 1)).unwrap_err();
        assert_eq!(err.code(), "DMN-05001");
    }
}
