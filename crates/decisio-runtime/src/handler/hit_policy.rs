//! Hit policies
//!
//! A hit policy reduces the matching rules of a decision table to the rules
//! that make up its result, and for COLLECT with an aggregator computes the
//! aggregate value.

use crate::error::{Result, RuntimeError};
use crate::event::{DecisionTableEvaluation, EvaluatedRule};
use decisio_core::{
    BuiltinAggregator, DecisionTableOutput, HitPolicy, HitPolicyEntry, TypedValue, Value,
    ValueType,
};

/// Apply the hit policy to the matching rules of `evaluation`
pub(crate) fn apply(
    entry: &HitPolicyEntry,
    outputs: &[DecisionTableOutput],
    evaluation: &mut DecisionTableEvaluation,
) -> Result<()> {
    let decision = evaluation.decision_key.clone();
    let rules = std::mem::take(&mut evaluation.matching_rules);

    evaluation.matching_rules = match entry.hit_policy {
        HitPolicy::Unique => unique(&decision, rules)?,
        HitPolicy::Any => any(&decision, rules)?,
        HitPolicy::First => rules.into_iter().take(1).collect(),
        HitPolicy::RuleOrder | HitPolicy::Collect => rules,
        HitPolicy::Priority => sort_by_output_values(&decision, entry, outputs, rules)?
            .into_iter()
            .take(1)
            .collect(),
        HitPolicy::OutputOrder => sort_by_output_values(&decision, entry, outputs, rules)?,
    };

    if let Some(aggregator) = entry.aggregator {
        if let Some((name, value)) =
            aggregate(&decision, aggregator, outputs, &evaluation.matching_rules)?
        {
            evaluation.collect_result_name = Some(name);
            evaluation.collect_result_value = Some(value);
        }
    }
    Ok(())
}

fn rule_ids(rules: &[EvaluatedRule]) -> Vec<String> {
    rules.iter().map(EvaluatedRule::display_id).collect()
}

fn unique(decision: &str, rules: Vec<EvaluatedRule>) -> Result<Vec<EvaluatedRule>> {
    if rules.len() > 1 {
        return Err(RuntimeError::UniqueViolation {
            decision: decision.to_string(),
            rules: rule_ids(&rules),
        });
    }
    Ok(rules)
}

fn any(decision: &str, mut rules: Vec<EvaluatedRule>) -> Result<Vec<EvaluatedRule>> {
    if let Some((first, rest)) = rules.split_first() {
        if rest.iter().any(|rule| rule.outputs != first.outputs) {
            return Err(RuntimeError::AnyViolation {
                decision: decision.to_string(),
                rules: rule_ids(&rules),
            });
        }
    }
    rules.truncate(1);
    Ok(rules)
}

/// Order matching rules by the position of their outputs in the declared
/// output values, comparing outputs in declared order
fn sort_by_output_values(
    decision: &str,
    entry: &HitPolicyEntry,
    outputs: &[DecisionTableOutput],
    rules: Vec<EvaluatedRule>,
) -> Result<Vec<EvaluatedRule>> {
    if rules.is_empty() {
        return Err(RuntimeError::NoMatchingRule {
            decision: decision.to_string(),
            hit_policy: entry.hit_policy.to_string(),
        });
    }

    let ranked: Vec<&DecisionTableOutput> = outputs
        .iter()
        .filter(|output| !output.output_values.is_empty())
        .collect();

    if rules.len() == 1 {
        // a single match is only checked against the values it produced
        for output in &ranked {
            if let Some(evaluated) = rules[0].output(output.result_name()) {
                position(decision, output, Some(evaluated.value.value()))?;
            }
        }
        return Ok(rules);
    }

    let mut keyed = rules
        .into_iter()
        .map(|rule| {
            let key = ranked
                .iter()
                .map(|output| {
                    let value = rule
                        .output(output.result_name())
                        .map(|evaluated| evaluated.value.value());
                    position(decision, output, value)
                })
                .collect::<Result<Vec<usize>>>()?;
            Ok((key, rule))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
    Ok(keyed.into_iter().map(|(_, rule)| rule).collect())
}

fn position(decision: &str, output: &DecisionTableOutput, value: Option<&Value>) -> Result<usize> {
    value
        .and_then(|value| output.output_values.iter().position(|allowed| allowed == value))
        .ok_or_else(|| RuntimeError::OutputValueNotAllowed {
            decision: decision.to_string(),
            output: output.result_name().to_string(),
            value: value.map_or_else(|| "null".to_string(), Value::to_string),
            allowed: output.output_values.iter().map(Value::to_string).collect(),
        })
}

/// Aggregate the single output of the matching rules.
///
/// Returns no value for SUM, MIN and MAX without any value to aggregate.
fn aggregate(
    decision: &str,
    aggregator: BuiltinAggregator,
    outputs: &[DecisionTableOutput],
    rules: &[EvaluatedRule],
) -> Result<Option<(String, TypedValue)>> {
    if rules.iter().any(|rule| rule.outputs.len() > 1) {
        return Err(RuntimeError::AggregationOnCompoundOutput {
            decision: decision.to_string(),
            aggregator: aggregator.to_string(),
        });
    }

    let name = rules
        .iter()
        .find_map(|rule| rule.outputs.first())
        .map(|output| output.name.clone())
        .or_else(|| outputs.first().map(|output| output.result_name().to_string()))
        .unwrap_or_default();

    let mut values: Vec<&TypedValue> = Vec::new();
    for output in rules.iter().filter_map(|rule| rule.outputs.first()) {
        match output.value.value() {
            Value::Null => {}
            Value::Number(_) => values.push(&output.value),
            other => {
                return Err(RuntimeError::NonNumericAggregation {
                    decision: decision.to_string(),
                    aggregator: aggregator.to_string(),
                    value: other.to_string(),
                    value_type: other.type_name().to_string(),
                })
            }
        }
    }

    if aggregator == BuiltinAggregator::Count {
        return Ok(Some((
            name,
            TypedValue::new(Value::Number(values.len() as f64), ValueType::Integer),
        )));
    }

    let numbers: Vec<f64> = values.iter().filter_map(|v| v.value().as_f64()).collect();
    let aggregated = match aggregator {
        BuiltinAggregator::Sum => numbers.iter().copied().reduce(|a, b| a + b),
        BuiltinAggregator::Min => numbers.iter().copied().reduce(f64::min),
        BuiltinAggregator::Max => numbers.iter().copied().reduce(f64::max),
        BuiltinAggregator::Count => None,
    };

    Ok(aggregated.map(|value| {
        (
            name,
            TypedValue::new(Value::Number(value), result_type(&values)),
        )
    }))
}

/// Integer if every value is an integer, long if every value is integral,
/// double otherwise
fn result_type(values: &[&TypedValue]) -> ValueType {
    if values
        .iter()
        .all(|value| value.value_type() == ValueType::Integer)
    {
        ValueType::Integer
    } else if values.iter().all(|value| value.value().is_integral()) {
        ValueType::Long
    } else {
        ValueType::Double
    }
}
