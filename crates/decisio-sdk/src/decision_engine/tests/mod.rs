//! Unit tests for DecisionEngine

use crate::builder::DecisionEngineBuilder;
use crate::error::SdkError;
use decisio_core::Value;
use decisio_runtime::Variables;

const MODEL: &str = r#"
decisions:
  - id: isGold
    requires: [tier]
    literal_expression:
      variable: { name: isGold, type: boolean }
      text: 'tier == "gold"'
  - id: tier
    decision_table:
      hit_policy: FIRST
      inputs:
        - expression: spend
      outputs:
        - name: tier
          type: string
      rules:
        - when: ['>= 1000']
          then: ['"gold"']
        - when: ['-']
          then: ['"standard"']
"#;

#[test]
fn test_parse_decision() {
    let engine = DecisionEngineBuilder::new().build().unwrap();

    let decision = engine.parse_decision("tier", MODEL).unwrap();
    assert_eq!(decision.key, "tier");

    let err = engine.parse_decision("missing", MODEL).unwrap_err();
    assert_eq!(err.code(), "DMN-01001");
}

#[test]
fn test_evaluate_decision_table_by_key() {
    let engine = DecisionEngineBuilder::new().build().unwrap();
    let result = engine
        .evaluate_decision_table_by_key("tier", MODEL, &Variables::new().with("spend", 1500))
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.single_entry().unwrap(), Some(&Value::from("gold")));
}

#[test]
fn test_literal_expression_is_not_a_table() {
    let engine = DecisionEngineBuilder::new().build().unwrap();
    let err = engine
        .evaluate_decision_table_by_key("isGold", MODEL, &Variables::new())
        .unwrap_err();

    assert!(matches!(err, SdkError::NotADecisionTable { .. }));
    assert_eq!(err.code(), "DMN-01003");
}

#[test]
fn test_metrics_follow_config() {
    let enabled = DecisionEngineBuilder::new().build().unwrap();
    let disabled = DecisionEngineBuilder::new().enable_metrics(false).build().unwrap();
    let variables = Variables::new().with("spend", 10);

    for engine in [&enabled, &disabled] {
        engine
            .evaluate_decision_by_key("isGold", MODEL, &variables)
            .unwrap();
    }

    assert_eq!(enabled.metrics().executed_decision_instances(), 2);
    assert_eq!(disabled.metrics().executed_decision_instances(), 0);
}
