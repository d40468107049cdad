//! Decision parser
//!
//! Parses one YAML decision definition into its decision logic. Requirement
//! links are resolved afterwards by the model transformer.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use crate::yaml_parser::YamlParser;
use decisio_core::ast::Expression;
use decisio_core::{
    BuiltinAggregator, DecisionExpression, DecisionLogic, DecisionTable, DecisionTableInput,
    DecisionTableOutput, DecisionTableRule, DecisionVariable, HitPolicy, HitPolicyEntry,
    LiteralExpression, Value, ValueType,
};
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;

const DECISION_FIELDS: &[&str] = &[
    "id",
    "name",
    "description",
    "requires",
    "decision_table",
    "literal_expression",
];
const TABLE_FIELDS: &[&str] = &["hit_policy", "aggregation", "inputs", "outputs", "rules"];
const INPUT_FIELDS: &[&str] = &["id", "label", "expression", "language", "input_variable", "type"];
const OUTPUT_FIELDS: &[&str] = &["id", "label", "name", "type", "values"];
const RULE_FIELDS: &[&str] = &["id", "description", "when", "then"];
const LITERAL_FIELDS: &[&str] = &["variable", "text", "language"];
const VARIABLE_FIELDS: &[&str] = &["name", "type"];

/// A parsed decision whose requirements are still plain ids
#[derive(Debug)]
pub struct DecisionDefinition {
    pub key: String,
    pub name: Option<String>,
    pub requires: Vec<String>,
    pub logic: DecisionLogic,
}

/// Decision parser
pub struct DecisionParser;

impl DecisionParser {
    /// Parse a decision from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<DecisionDefinition> {
        let key = YamlParser::get_string(yaml, "id")?;
        YamlParser::warn_unknown_fields(yaml, DECISION_FIELDS, &format!("decision '{}'", key));

        let name = YamlParser::get_optional_string(yaml, "name");
        let requires = YamlParser::get_string_list(yaml, "requires")?;

        let logic = match (yaml.get("decision_table"), yaml.get("literal_expression")) {
            (Some(table), None) => DecisionLogic::DecisionTable(Self::parse_table(&key, table)?),
            (None, Some(literal)) => {
                DecisionLogic::LiteralExpression(Self::parse_literal_expression(&key, literal)?)
            }
            (Some(_), Some(_)) => {
                return Err(ParseError::InvalidValue {
                    field: format!("decision '{}'", key),
                    message: "a decision has either a decision_table or a literal_expression"
                        .to_string(),
                })
            }
            (None, None) => return Err(ParseError::MissingDecisionLogic(key)),
        };

        log::debug!("Parsed decision '{}' ({})", key, logic.kind());

        Ok(DecisionDefinition {
            key,
            name,
            requires,
            logic,
        })
    }

    fn parse_table(key: &str, yaml: &YamlValue) -> Result<DecisionTable> {
        YamlParser::warn_unknown_fields(yaml, TABLE_FIELDS, &format!("decision table '{}'", key));

        let hit_policy = Self::parse_hit_policy(yaml)?;

        let inputs = YamlParser::get_optional_array(yaml, "inputs")
            .map(|items| items.iter().map(Self::parse_input).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        let outputs = YamlParser::get_array(yaml, "outputs")?
            .iter()
            .map(Self::parse_output)
            .collect::<Result<Vec<_>>>()?;
        Self::validate_outputs(key, &outputs)?;

        if hit_policy.hit_policy.requires_output_values()
            && outputs.iter().all(|output| output.output_values.is_empty())
        {
            return Err(ParseError::MissingOutputValues {
                decision: key.to_string(),
                hit_policy: hit_policy.hit_policy.to_string(),
            });
        }

        let rules = YamlParser::get_optional_array(yaml, "rules")
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, rule)| {
                        Self::parse_rule(key, index, rule, inputs.len(), outputs.len())
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(DecisionTable {
            hit_policy,
            inputs,
            outputs,
            rules,
        })
    }

    /// Accepts `UNIQUE`, `COLLECT SUM`, `{policy: COLLECT, aggregation: SUM}`
    /// or a policy with a table-level `aggregation` field
    fn parse_hit_policy(yaml: &YamlValue) -> Result<HitPolicyEntry> {
        let table_aggregation = YamlParser::get_optional_string(yaml, "aggregation");

        match yaml.get("hit_policy") {
            None | Some(YamlValue::Null) => match table_aggregation {
                Some(aggregation) => Ok(HitPolicyEntry::collect(
                    aggregation.parse::<BuiltinAggregator>()?,
                )),
                None => Ok(HitPolicyEntry::default()),
            },
            Some(YamlValue::String(text)) => {
                let entry: HitPolicyEntry = text.parse()?;
                match table_aggregation {
                    Some(aggregation) if entry.aggregator.is_none() => {
                        let aggregator = Some(aggregation.parse::<BuiltinAggregator>()?);
                        Ok(HitPolicyEntry::with_aggregator(entry.hit_policy, aggregator)?)
                    }
                    _ => Ok(entry),
                }
            }
            Some(mapping @ YamlValue::Mapping(_)) => {
                YamlParser::warn_unknown_fields(mapping, &["policy", "aggregation"], "hit_policy");
                let policy: HitPolicy = YamlParser::get_string(mapping, "policy")?.parse()?;
                let aggregator = YamlParser::get_optional_string(mapping, "aggregation")
                    .or(table_aggregation)
                    .map(|a| a.parse::<BuiltinAggregator>())
                    .transpose()?;
                Ok(HitPolicyEntry::with_aggregator(policy, aggregator)?)
            }
            Some(_) => Err(ParseError::InvalidValue {
                field: "hit_policy".to_string(),
                message: "expected a string or a mapping".to_string(),
            }),
        }
    }

    fn parse_input(yaml: &YamlValue) -> Result<DecisionTableInput> {
        YamlParser::warn_unknown_fields(yaml, INPUT_FIELDS, "decision table input");

        let language = YamlParser::get_optional_string(yaml, "language");
        let expression = yaml
            .get("expression")
            .map(|value| Self::parse_cell(value, "expression"))
            .transpose()?
            .map(|mut expr| {
                if expr.language.is_none() {
                    expr.language = language;
                }
                expr
            });

        Ok(DecisionTableInput {
            id: YamlParser::get_optional_string(yaml, "id"),
            label: YamlParser::get_optional_string(yaml, "label"),
            expression,
            input_variable: YamlParser::get_optional_string(yaml, "input_variable")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DecisionTableInput::DEFAULT_INPUT_VARIABLE.to_string()),
            type_definition: Self::parse_type(yaml)?,
        })
    }

    fn parse_output(yaml: &YamlValue) -> Result<DecisionTableOutput> {
        YamlParser::warn_unknown_fields(yaml, OUTPUT_FIELDS, "decision table output");

        let output_values = YamlParser::get_optional_array(yaml, "values")
            .map(|values| values.iter().map(Self::parse_output_value).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        Ok(DecisionTableOutput {
            id: YamlParser::get_optional_string(yaml, "id"),
            label: YamlParser::get_optional_string(yaml, "label"),
            name: YamlParser::get_optional_string(yaml, "name").filter(|n| !n.is_empty()),
            type_definition: Self::parse_type(yaml)?,
            output_values,
        })
    }

    /// Output values are literals: YAML scalars or expression-language literals
    fn parse_output_value(yaml: &YamlValue) -> Result<Value> {
        match yaml {
            YamlValue::String(text) => match ExpressionParser::parse(text)? {
                Expression::Literal(value) => Ok(value),
                _ => Err(ParseError::InvalidValue {
                    field: "values".to_string(),
                    message: format!("output value '{}' is not a literal", text),
                }),
            },
            YamlValue::Null => Ok(Value::Null),
            YamlValue::Bool(b) => Ok(Value::Bool(*b)),
            YamlValue::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| {
                ParseError::InvalidValue {
                    field: "values".to_string(),
                    message: format!("number {} out of range", n),
                }
            }),
            _ => Err(ParseError::InvalidValue {
                field: "values".to_string(),
                message: "output values must be scalars".to_string(),
            }),
        }
    }

    fn validate_outputs(key: &str, outputs: &[DecisionTableOutput]) -> Result<()> {
        let needs_name = outputs.len() > 1;
        let mut used_names = HashSet::new();

        for output in outputs {
            match &output.name {
                None if needs_name => {
                    return Err(ParseError::CompoundOutputWithoutName {
                        decision: key.to_string(),
                    })
                }
                Some(name) if !used_names.insert(name.as_str()) => {
                    return Err(ParseError::DuplicateOutputName {
                        decision: key.to_string(),
                        name: name.clone(),
                    })
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn parse_rule(
        key: &str,
        index: usize,
        yaml: &YamlValue,
        input_count: usize,
        output_count: usize,
    ) -> Result<DecisionTableRule> {
        YamlParser::warn_unknown_fields(yaml, RULE_FIELDS, &format!("rule of decision '{}'", key));

        let id = YamlParser::get_optional_string(yaml, "id");
        let rule_name = id.clone().unwrap_or_else(|| format!("#{}", index + 1));

        let conditions = Self::parse_cells(yaml, "when")?;
        if conditions.len() != input_count {
            return Err(ParseError::InputEntryCount {
                decision: key.to_string(),
                rule: rule_name,
                expected: input_count,
                actual: conditions.len(),
            });
        }

        let conclusions = Self::parse_cells(yaml, "then")?;
        if conclusions.len() != output_count {
            return Err(ParseError::OutputEntryCount {
                decision: key.to_string(),
                rule: rule_name,
                expected: output_count,
                actual: conclusions.len(),
            });
        }

        Ok(DecisionTableRule {
            id,
            conditions,
            conclusions,
        })
    }

    fn parse_cells(yaml: &YamlValue, field: &str) -> Result<Vec<DecisionExpression>> {
        match yaml.get(field) {
            None | Some(YamlValue::Null) => Ok(Vec::new()),
            Some(YamlValue::Sequence(cells)) => cells
                .iter()
                .map(|cell| Self::parse_cell(cell, field))
                .collect(),
            // a single-column table may use a bare scalar
            Some(cell) => Ok(vec![Self::parse_cell(cell, field)?]),
        }
    }

    /// A cell is a scalar (its text) or `{text, language}`
    fn parse_cell(yaml: &YamlValue, field: &str) -> Result<DecisionExpression> {
        if let Some(text) = YamlParser::scalar_text(yaml) {
            return Ok(DecisionExpression::new(text));
        }

        if yaml.is_mapping() {
            YamlParser::warn_unknown_fields(yaml, &["id", "text", "language"], field);
            let text = YamlParser::get_optional_string(yaml, "text").unwrap_or_default();
            let mut expression = DecisionExpression::new(text);
            expression.id = YamlParser::get_optional_string(yaml, "id");
            expression.language = YamlParser::get_optional_string(yaml, "language");
            return Ok(expression);
        }

        Err(ParseError::InvalidValue {
            field: field.to_string(),
            message: "expected a scalar or a {text, language} mapping".to_string(),
        })
    }

    fn parse_literal_expression(key: &str, yaml: &YamlValue) -> Result<LiteralExpression> {
        YamlParser::warn_unknown_fields(
            yaml,
            LITERAL_FIELDS,
            &format!("literal expression '{}'", key),
        );

        let variable_yaml = yaml.get("variable").ok_or_else(|| ParseError::MissingField {
            field: format!("literal_expression.variable of decision '{}'", key),
        })?;
        YamlParser::warn_unknown_fields(variable_yaml, VARIABLE_FIELDS, "variable");

        let variable = DecisionVariable {
            name: YamlParser::get_string(variable_yaml, "name")?,
            type_definition: Self::parse_type(variable_yaml)?,
        };

        let mut expression = DecisionExpression::new(YamlParser::get_string(yaml, "text")?);
        expression.language = YamlParser::get_optional_string(yaml, "language");

        Ok(LiteralExpression {
            variable,
            expression,
        })
    }

    fn parse_type(yaml: &YamlValue) -> Result<ValueType> {
        match YamlParser::get_optional_string(yaml, "type") {
            Some(type_name) => Ok(type_name.parse()?),
            None => Ok(ValueType::Untyped),
        }
    }
}
