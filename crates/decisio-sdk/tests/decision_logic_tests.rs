//! Integration tests for decision evaluation
//!
//! Evaluates complete models through the engine: required decisions,
//! literal expressions and every hit policy.

mod common;

use common::{numbers, strings, ResultAssertions, TestEngine};
use decisio_sdk::{DecisionEngineBuilder, Value, ValueType};

const DINNER_MODEL: &str = r#"
definitions:
  id: dinner
  name: Dinner Decisions
decisions:
  - id: dish
    name: Dish
    requires: [season, guestCount]
    decision_table:
      hit_policy: UNIQUE
      inputs:
        - label: Season
          expression: season
          type: string
        - label: How many guests
          expression: guestCount
          type: integer
      outputs:
        - name: desiredDish
          type: string
      rules:
        - id: r1
          when: ['"Fall"', '<= 8']
          then: ['"Spareribs"']
        - id: r2
          when: ['"Winter"', '<= 8']
          then: ['"Roastbeef"']
        - id: r3
          when: ['"Spring", "Summer"', '-']
          then: ['"Light Salad"']
        - id: r4
          when: ['not("Spring", "Summer")', '> 8']
          then: ['"Stew"']
  - id: season
    decision_table:
      inputs:
        - expression: month
          type: integer
      outputs:
        - name: season
          type: string
      rules:
        - when: ['[3..5]']
          then: ['"Spring"']
        - when: ['[6..8]']
          then: ['"Summer"']
        - when: ['[9..11]']
          then: ['"Fall"']
        - when: ['12, [1..2]']
          then: ['"Winter"']
  - id: guestCount
    literal_expression:
      variable: { name: guestCount, type: integer }
      text: adults + children
"#;

// ============================================================================
// Required Decisions
// ============================================================================

#[test]
fn test_dinner_dish() {
    let engine = TestEngine::new(DINNER_MODEL);

    engine
        .evaluate("dish", vars!("month" => 1, "adults" => 2, "children" => 2))
        .assert_single_entry("Roastbeef");
    engine
        .evaluate("dish", vars!("month" => 10, "adults" => 6, "children" => 4))
        .assert_single_entry("Stew");
    engine
        .evaluate("dish", vars!("month" => 4, "adults" => 20, "children" => 0))
        .assert_single_entry("Light Salad");
}

#[test]
fn test_required_decision_alone() {
    let engine = TestEngine::new(DINNER_MODEL);

    let result = engine.evaluate_table("season", vars!("month" => 12));
    assert_eq!(result.single_entry().unwrap(), Some(&Value::from("Winter")));

    let guests = engine.evaluate("guestCount", vars!("adults" => 3, "children" => 1));
    let row = guests.single_result().unwrap().unwrap();
    assert_eq!(row.get("guestCount"), Some(&Value::Number(4.0)));
    assert_eq!(
        row.get_typed("guestCount").map(|v| v.value_type()),
        Some(ValueType::Integer)
    );
}

#[test]
fn test_no_matching_rule_gives_empty_result() {
    let engine = TestEngine::new(DINNER_MODEL);
    let result = engine.evaluate("season", vars!("month" => 13));
    assert!(result.is_empty());
    assert!(result.single_result().unwrap().is_none());
}

#[test]
fn test_metrics_count_every_decision() {
    let engine = TestEngine::new(DINNER_MODEL);
    engine.evaluate("dish", vars!("month" => 7, "adults" => 2, "children" => 0));

    let metrics = engine.engine().metrics();
    assert_eq!(metrics.executed_decision_instances(), 3);
    // season: (1 + 1) * 4, guestCount: 1, dish: (2 + 1) * 4
    assert_eq!(metrics.executed_decision_elements(), 21);
}

#[test]
fn test_type_errors_fail_the_call() {
    let engine = TestEngine::new(DINNER_MODEL);
    let err = engine.evaluate_err("dish", vars!("month" => 1, "adults" => 2, "children" => 0.5));
    assert_eq!(err.code(), "DMN-04001");
}

// ============================================================================
// Hit Policies
// ============================================================================

const RISK_MODEL: &str = r#"
decisions:
  - id: priority
    decision_table:
      hit_policy: PRIORITY
      inputs:
        - expression: amount
      outputs:
        - name: status
          values: ['"declined"', '"review"', '"approved"']
      rules:
        - when: ['> 0']
          then: ['"approved"']
        - when: ['> 1000']
          then: ['"review"']
        - when: ['> 5000']
          then: ['"declined"']
  - id: ordered
    decision_table:
      hit_policy: OUTPUT ORDER
      inputs:
        - expression: amount
      outputs:
        - name: status
          values: ['"declined"', '"review"', '"approved"']
      rules:
        - when: ['> 0']
          then: ['"approved"']
        - when: ['> 1000']
          then: ['"review"']
        - when: ['> 5000']
          then: ['"declined"']
  - id: checks
    decision_table:
      hit_policy: RULE ORDER
      inputs:
        - expression: amount
        - expression: country
      outputs:
        - name: check
        - name: weight
      rules:
        - when: ['> 1000', '-']
          then: ['"large amount"', '2']
        - when: ['-', '"XX"']
          then: ['"risky country"', '']
        - when: ['< 0', '-']
          then: ['"refund"', '1']
  - id: anyCheck
    decision_table:
      hit_policy: ANY
      inputs:
        - expression: amount
      outputs:
        - name: flag
      rules:
        - when: ['> 1000']
          then: ['true']
        - when: ['> 2000']
          then: ['true']
        - when: ['> 3000']
          then: ['false']
"#;

#[test]
fn test_priority() {
    let engine = TestEngine::new(RISK_MODEL);
    engine
        .evaluate("priority", vars!("amount" => 6000))
        .assert_single_entry("declined");
    engine
        .evaluate("priority", vars!("amount" => 2000))
        .assert_single_entry("review");

    let err = engine.evaluate_err("priority", vars!("amount" => -5));
    assert_eq!(err.code(), "DMN-03005");
}

#[test]
fn test_output_order() {
    let engine = TestEngine::new(RISK_MODEL);
    let result = engine.evaluate("ordered", vars!("amount" => 6000));
    result.assert_entries("status", strings(&["declined", "review", "approved"]));
}

#[test]
fn test_rule_order_with_compound_outputs() {
    let engine = TestEngine::new(RISK_MODEL);
    let result = engine.evaluate("checks", vars!("amount" => 5000, "country" => "XX"));

    assert_eq!(result.len(), 2);
    result.assert_entries("check", strings(&["large amount", "risky country"]));
    result.assert_entries("weight", numbers(&[2.0]));
    assert_eq!(result.get(1).unwrap().key_set(), vec!["check"]);
}

#[test]
fn test_blank_outputs_as_null() {
    let builder = DecisionEngineBuilder::new().return_blank_table_output_as_null(true);
    let engine = TestEngine::with_builder(builder, RISK_MODEL);
    let result = engine.evaluate("checks", vars!("amount" => 5000, "country" => "XX"));

    assert_eq!(
        result.collect_entries("weight"),
        vec![Value::Number(2.0), Value::Null]
    );
}

#[test]
fn test_any() {
    let engine = TestEngine::new(RISK_MODEL);
    engine
        .evaluate("anyCheck", vars!("amount" => 2500))
        .assert_single_entry(true);

    let err = engine.evaluate_err("anyCheck", vars!("amount" => 3500));
    assert_eq!(err.code(), "DMN-03002");
}

// ============================================================================
// Collect Aggregation
// ============================================================================

fn points_model(hit_policy: &str) -> String {
    format!(
        r#"
decisions:
  - id: points
    decision_table:
      hit_policy: {}
      inputs:
        - expression: age
      outputs:
        - name: points
      rules:
        - when: ['< 25']
          then: ['10']
        - when: ['< 30']
          then: ['5']
        - when: ['>= 60']
          then: ['2.5']
"#,
        hit_policy
    )
}

#[test]
fn test_collect_without_aggregator() {
    let engine = TestEngine::new(&points_model("COLLECT"));
    let result = engine.evaluate("points", vars!("age" => 20));
    result.assert_entries("points", numbers(&[10.0, 5.0]));
}

#[test]
fn test_collect_aggregators() {
    let young = || vars!("age" => 20);

    TestEngine::new(&points_model("COLLECT SUM"))
        .evaluate("points", young())
        .assert_single_entry(15.0);
    TestEngine::new(&points_model("C<"))
        .evaluate("points", young())
        .assert_single_entry(5.0);
    TestEngine::new(&points_model("{policy: COLLECT, aggregation: MAX}"))
        .evaluate("points", young())
        .assert_single_entry(10.0);
    TestEngine::new(&points_model("C#"))
        .evaluate("points", young())
        .assert_single_entry(2.0);
}

#[test]
fn test_collect_types() {
    let engine = TestEngine::new(&points_model("COLLECT SUM"));

    let integral = engine.evaluate("points", vars!("age" => 20));
    let value = integral.single_result().unwrap().unwrap().get_typed("points").cloned();
    assert_eq!(value.map(|v| v.value_type()), Some(ValueType::Long));

    let fractional = engine.evaluate("points", vars!("age" => 70));
    let value = fractional.single_result().unwrap().unwrap().get_typed("points").cloned();
    assert_eq!(value.map(|v| v.value_type()), Some(ValueType::Double));
}

#[test]
fn test_collect_without_match() {
    let adult = || vars!("age" => 40);

    let sum = TestEngine::new(&points_model("COLLECT SUM")).evaluate("points", adult());
    assert!(sum.is_empty());

    TestEngine::new(&points_model("COLLECT COUNT"))
        .evaluate("points", adult())
        .assert_single_entry(0);
}
