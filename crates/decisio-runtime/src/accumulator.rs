//! Variable scope accumulator
//!
//! Merges the result of a required decision into the scope seen by the
//! decisions evaluated after it.

use crate::context::VariableScope;
use decisio_core::{Decision, DecisionResult, HitPolicy, TypedValue, Value};

/// Whether the decision is a table whose results always merge as lists
fn always_merges_as_list(decision: &Decision) -> bool {
    decision.as_decision_table().is_some_and(|table| {
        matches!(
            table.hit_policy.hit_policy,
            HitPolicy::Collect | HitPolicy::RuleOrder
        )
    })
}

/// Merge a decision's result into the scope.
///
/// - no rows: the scope is unchanged
/// - one row, unless the decision is a COLLECT or RULE ORDER table: every
///   entry becomes a variable
/// - otherwise each output name becomes a list of its values, in row order,
///   from the rows that define it
pub fn merge(scope: &mut VariableScope, decision: &Decision, result: &DecisionResult) {
    if result.is_empty() {
        return;
    }

    if result.len() == 1 && !always_merges_as_list(decision) {
        for row in result.iter() {
            for (name, value) in row.iter() {
                scope.set(name, value.clone());
            }
        }
        return;
    }

    let mut names: Vec<&str> = Vec::new();
    for row in result.iter() {
        for (name, _) in row.iter() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    for name in names {
        let values = result.collect_entries(name);
        scope.set(name, TypedValue::untyped(Value::Array(values)));
    }
}
