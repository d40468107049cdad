//! Unit tests for decisio-runtime
//!
//! Evaluates parsed decision models through the orchestrator: evaluation
//! order, scope merges, telemetry and error propagation.

use decisio_core::{Decision, DecisionResult, LogicKind, RuleResult, TypedValue, Value, ValueType};
use decisio_parser::{ModelTransformer, YamlModelTransformer};
use decisio_runtime::{
    DecisionContext, DecisionEvaluationEvent, DecisionEvaluationListener, DecisionLogicHandler,
    DecisionTableHandler, EvaluationDetail, EvaluationEvent, EvaluationSettings,
    ExpressionLanguages, HandlerRegistry, LiteralExpressionEvaluation, MetricCollector,
    RuntimeError, VariableContext, VariableScope, Variables,
};
use std::sync::{Arc, Mutex};

const CHAIN_MODEL: &str = r#"
decisions:
  - id: a
    requires: [b]
    literal_expression:
      variable: { name: a, type: integer }
      text: sum(b) + c - 10
  - id: b
    requires: [c]
    decision_table:
      hit_policy: COLLECT
      inputs:
        - expression: c
      outputs:
        - name: b
      rules:
        - when: ['10']
          then: ['1']
        - when: ['> 5']
          then: ['2']
        - when: ['< 5']
          then: ['3']
  - id: c
    decision_table:
      hit_policy: UNIQUE
      inputs:
        - expression: x
      outputs:
        - name: c
      rules:
        - when: ['1']
          then: ['10']
        - when: ['2']
          then: ['20']
"#;

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<DecisionEvaluationEvent>>,
}

impl DecisionEvaluationListener for RecordingListener {
    fn notify(&self, event: &DecisionEvaluationEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

struct FailingListener;

impl DecisionEvaluationListener for FailingListener {
    fn notify(&self, _event: &DecisionEvaluationEvent) -> anyhow::Result<()> {
        anyhow::bail!("audit sink unavailable")
    }
}

/// Appends its name to a shared log on every notification
struct NamedListener {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

impl NamedListener {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: log.clone(),
            fail,
        })
    }
}

impl DecisionEvaluationListener for NamedListener {
    fn notify(&self, _event: &DecisionEvaluationEvent) -> anyhow::Result<()> {
        self.log.lock().unwrap().push(self.name);
        if self.fail {
            anyhow::bail!("{} unavailable", self.name);
        }
        Ok(())
    }
}

/// Literal expression handler that multiplies `c` by 100 and reports five
/// executed elements
struct ScaledLiteralHandler;

impl DecisionLogicHandler for ScaledLiteralHandler {
    fn evaluate(
        &self,
        decision: &Arc<Decision>,
        context: &dyn VariableContext,
    ) -> decisio_runtime::Result<EvaluationEvent> {
        let c = context
            .resolve("c")
            .and_then(|value| value.value().as_f64())
            .unwrap_or_default();

        Ok(EvaluationEvent {
            decision: decision.clone(),
            executed_decision_elements: 5,
            detail: EvaluationDetail::LiteralExpression(LiteralExpressionEvaluation {
                output_name: decision.key.clone(),
                output_value: TypedValue::new(Value::Number(c * 100.0), ValueType::Double),
            }),
        })
    }

    fn generate_decision_result(
        &self,
        event: &EvaluationEvent,
    ) -> decisio_runtime::Result<DecisionResult> {
        let evaluation = event.as_literal_expression().ok_or_else(|| {
            RuntimeError::UnsupportedLogicType {
                decision: event.decision_key().to_string(),
                kind: event.decision.kind().to_string(),
            }
        })?;
        Ok(DecisionResult::new(vec![RuleResult::single(
            evaluation.output_name.clone(),
            evaluation.output_value.clone(),
        )]))
    }
}

fn decision(key: &str) -> Arc<Decision> {
    YamlModelTransformer::new()
        .transform_decision_requirements_graph(CHAIN_MODEL)
        .unwrap()
        .decision(key)
        .cloned()
        .unwrap()
}

fn default_handlers() -> Arc<HandlerRegistry> {
    Arc::new(HandlerRegistry::with_defaults(
        EvaluationSettings::default(),
        Arc::new(ExpressionLanguages::with_defaults()),
        Vec::new(),
    ))
}

fn context_with(listeners: Vec<Arc<dyn DecisionEvaluationListener>>) -> DecisionContext {
    DecisionContext::new(default_handlers(), listeners)
}

// ========== Orchestrator Tests ==========

#[test]
fn test_chain_merges_required_results_only() {
    let context = context_with(Vec::new());
    let mut scope = VariableScope::new();
    scope.set_value("x", 1);

    let result = context.evaluate_in_scope(&decision("a"), &mut scope).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(
        result.single_result().unwrap().unwrap().get("a"),
        Some(&Value::Number(3.0))
    );

    assert_eq!(scope.key_set(), vec!["x", "c", "b"]);
    assert_eq!(scope.value("c"), Some(&Value::Number(10.0)));
    assert_eq!(
        scope.value("b"),
        Some(&Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
    assert!(scope.value("a").is_none());
}

#[test]
fn test_required_decision_can_be_evaluated_alone() {
    let context = context_with(Vec::new());
    let variables = Variables::new().with("x", 2);

    let result = context.evaluate_decision(&decision("c"), &variables).unwrap();
    assert_eq!(result.collect_entries("c"), vec![Value::Number(20.0)]);
}

#[test]
fn test_caller_variables_are_not_modified() {
    let context = context_with(Vec::new());
    let variables = Variables::new().with("x", 1);

    context.evaluate_decision(&decision("a"), &variables).unwrap();
    assert_eq!(variables.len(), 1);
    assert!(variables.get("c").is_none());
}

// ========== Telemetry Tests ==========

#[test]
fn test_listener_receives_aggregate_event() {
    let listener = Arc::new(RecordingListener::default());
    let context = context_with(vec![listener.clone() as Arc<dyn DecisionEvaluationListener>]);

    context
        .evaluate_decision(&decision("a"), &Variables::new().with("x", 1))
        .unwrap();

    let events = listener.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.evaluated_keys(), vec!["c", "b", "a"]);
    assert_eq!(event.executed_decision_instances, 3);
    // c: (1 + 1) * 2, b: (1 + 1) * 3, a: 1
    assert_eq!(event.executed_decision_elements, 11);
    assert_eq!(event.decision_result.decision_key(), "a");
}

#[test]
fn test_metric_collector_accumulates() {
    let metrics = Arc::new(MetricCollector::new());
    let context = context_with(vec![metrics.clone() as Arc<dyn DecisionEvaluationListener>]);
    let variables = Variables::new().with("x", 1);

    context.evaluate_decision(&decision("a"), &variables).unwrap();
    context.evaluate_decision(&decision("c"), &variables).unwrap();

    assert_eq!(metrics.executed_decision_instances(), 4);
    assert_eq!(metrics.executed_decision_elements(), 15);

    metrics.clear();
    assert_eq!(metrics.executed_decision_instances(), 0);
}

#[test]
fn test_listener_failure_fails_the_call() {
    let context = context_with(vec![
        Arc::new(FailingListener) as Arc<dyn DecisionEvaluationListener>
    ]);
    let err = context
        .evaluate_decision(&decision("c"), &Variables::new().with("x", 1))
        .unwrap_err();

    assert_eq!(err.code(), "DMN-01005");
    assert!(err.to_string().contains("audit sink unavailable"));
}

#[test]
fn test_listeners_notified_once_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let context = context_with(vec![
        NamedListener::new("first", &log, false) as Arc<dyn DecisionEvaluationListener>,
        NamedListener::new("second", &log, false) as Arc<dyn DecisionEvaluationListener>,
        NamedListener::new("third", &log, false) as Arc<dyn DecisionEvaluationListener>,
    ]);

    context
        .evaluate_decision(&decision("a"), &Variables::new().with("x", 1))
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_failing_listener_stops_later_listeners() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let context = context_with(vec![
        NamedListener::new("audit", &log, false) as Arc<dyn DecisionEvaluationListener>,
        NamedListener::new("archive", &log, true) as Arc<dyn DecisionEvaluationListener>,
        NamedListener::new("dashboard", &log, false) as Arc<dyn DecisionEvaluationListener>,
    ]);

    let err = context
        .evaluate_decision(&decision("a"), &Variables::new().with("x", 1))
        .unwrap_err();

    assert_eq!(err.code(), "DMN-01005");
    assert!(err.to_string().contains("archive unavailable"));
    assert_eq!(*log.lock().unwrap(), vec!["audit", "archive"]);
}

// ========== Dispatch Tests ==========

#[test]
fn test_registered_handler_replaces_builtin() {
    let mut handlers = HandlerRegistry::with_defaults(
        EvaluationSettings::default(),
        Arc::new(ExpressionLanguages::with_defaults()),
        Vec::new(),
    );
    handlers.register(LogicKind::LiteralExpression, Arc::new(ScaledLiteralHandler));
    assert!(handlers.contains(LogicKind::DecisionTable));

    let listener = Arc::new(RecordingListener::default());
    let context = DecisionContext::new(
        Arc::new(handlers),
        vec![listener.clone() as Arc<dyn DecisionEvaluationListener>],
    );
    let mut scope = VariableScope::new();
    scope.set_value("x", 1);

    let result = context.evaluate_in_scope(&decision("a"), &mut scope).unwrap();

    assert_eq!(
        result.single_result().unwrap().unwrap().get("a"),
        Some(&Value::Number(1000.0))
    );
    assert_eq!(scope.key_set(), vec!["x", "c", "b"]);

    let events = listener.events.lock().unwrap();
    assert_eq!(events[0].executed_decision_instances, 3);
    // c: 4, b: 6, a: 5 from the replacement handler
    assert_eq!(events[0].executed_decision_elements, 15);
}

// ========== Error Tests ==========

#[test]
fn test_unsupported_logic_type() {
    let context = DecisionContext::new(Arc::new(HandlerRegistry::new()), Vec::new());
    let err = context
        .evaluate_decision(&decision("c"), &Variables::new())
        .unwrap_err();
    assert_eq!(err.code(), "DMN-01002");
}

#[test]
fn test_empty_required_results_leave_scope_unchanged() {
    let context = context_with(Vec::new());
    let mut scope = VariableScope::new();
    scope.set_value("x", 3);

    // no rule of c matches, so b sees a null input and matches nothing
    let result = context.evaluate_in_scope(&decision("a"), &mut scope).unwrap();

    assert_eq!(scope.key_set(), vec!["x"]);
    assert_eq!(
        result.single_result().unwrap().unwrap().get("a"),
        Some(&Value::Null)
    );
}

#[test]
fn test_failure_after_required_decisions_aborts() {
    let mut handlers = HandlerRegistry::new();
    handlers.register(
        LogicKind::DecisionTable,
        Arc::new(DecisionTableHandler::new(
            EvaluationSettings::default(),
            Arc::new(ExpressionLanguages::with_defaults()),
            Vec::new(),
        )),
    );
    let listener = Arc::new(RecordingListener::default());
    let context = DecisionContext::new(
        Arc::new(handlers),
        vec![listener.clone() as Arc<dyn DecisionEvaluationListener>],
    );

    // c and b evaluate, the literal expression a has no handler
    let err = context
        .evaluate_decision(&decision("a"), &Variables::new().with("x", 1))
        .unwrap_err();

    assert_eq!(err.code(), "DMN-01002");
    assert!(listener.events.lock().unwrap().is_empty());
}

#[test]
fn test_cyclic_dependency() {
    let inner = decision("c");
    let outer = Arc::new(
        Decision::decision_table("c", Default::default()).with_requirement(inner),
    );

    let err = context_with(Vec::new())
        .evaluate_decision(&outer, &Variables::new())
        .unwrap_err();
    assert_eq!(err.code(), "DMN-01004");
}
