//! YAML Parser
//!
//! Field accessors and validation helpers shared by the model transformer.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        Self::get_optional_string(obj, field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    /// Get an optional string field. Scalars are accepted and rendered as text
    /// so `id: 42` reads as `"42"`.
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field).and_then(Self::scalar_text)
    }

    /// Get a required array field from YAML object
    pub fn get_array<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        obj.get(field)
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional array field from YAML object
    pub fn get_optional_array<'a>(obj: &'a YamlValue, field: &str) -> Option<&'a Vec<YamlValue>> {
        obj.get(field).and_then(|v| v.as_sequence())
    }

    /// Get an optional boolean field from YAML object
    pub fn get_optional_bool(obj: &YamlValue, field: &str) -> Option<bool> {
        obj.get(field).and_then(|v| v.as_bool())
    }

    /// A string field or a list of string fields, e.g. `requires: a` or
    /// `requires: [a, b]`
    pub fn get_string_list(obj: &YamlValue, field: &str) -> Result<Vec<String>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(Vec::new()),
            Some(YamlValue::Sequence(items)) => items
                .iter()
                .map(|item| {
                    Self::scalar_text(item).ok_or_else(|| ParseError::InvalidValue {
                        field: field.to_string(),
                        message: "expected a list of scalars".to_string(),
                    })
                })
                .collect(),
            Some(value) => Self::scalar_text(value)
                .map(|s| vec![s])
                .ok_or_else(|| ParseError::InvalidValue {
                    field: field.to_string(),
                    message: "expected a scalar or a list of scalars".to_string(),
                }),
        }
    }

    /// Render a scalar YAML value as text; null becomes an empty string
    pub fn scalar_text(value: &YamlValue) -> Option<String> {
        match value {
            YamlValue::Null => Some(String::new()),
            YamlValue::Bool(b) => Some(b.to_string()),
            YamlValue::Number(n) => Some(n.to_string()),
            YamlValue::String(s) => Some(s.clone()),
            YamlValue::Tagged(t) => Self::scalar_text(&t.value),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
        }
    }

    /// Check if a field exists in YAML object
    pub fn has_field(obj: &YamlValue, field: &str) -> bool {
        obj.get(field).is_some()
    }

    /// Validate fields in a YAML object against a list of known fields.
    /// Returns warnings for unknown fields with suggestions.
    pub fn validate_fields(obj: &YamlValue, known_fields: &[&str], context: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(mapping) = obj.as_mapping() {
            for (key, _) in mapping {
                let Some(field_name) = key.as_str() else {
                    continue;
                };
                if known_fields.contains(&field_name) {
                    continue;
                }

                let typo_correction = FIELD_CORRECTIONS
                    .iter()
                    .find(|(typo, _)| *typo == field_name)
                    .map(|(_, correct)| *correct)
                    .filter(|correct| known_fields.contains(correct));

                let suggestion = if let Some(correct) = typo_correction {
                    format!(" Did you mean '{}'?", correct)
                } else if let Some(similar) = Self::find_similar_field(field_name, known_fields) {
                    format!(" Did you mean '{}'?", similar)
                } else {
                    String::new()
                };

                warnings.push(format!(
                    "Unknown field '{}' in {}.{}",
                    field_name, context, suggestion
                ));
            }
        }

        warnings
    }

    /// Validate fields and log every unknown one as a warning
    pub fn warn_unknown_fields(obj: &YamlValue, known_fields: &[&str], context: &str) {
        for warning in Self::validate_fields(obj, known_fields, context) {
            log::warn!("{}", warning);
        }
    }

    /// Find similar field names using Levenshtein distance
    fn find_similar_field(field: &str, known_fields: &[&str]) -> Option<String> {
        known_fields
            .iter()
            .filter(|known| levenshtein_distance(field, known) <= 2)
            .min_by_key(|known| levenshtein_distance(field, known))
            .map(|s| s.to_string())
    }
}

/// Common field name typos and their corrections
const FIELD_CORRECTIONS: &[(&str, &str)] = &[
    ("require", "requires"),
    ("required", "requires"),
    ("depends_on", "requires"),
    ("hitpolicy", "hit_policy"),
    ("policy", "hit_policy"),
    ("input", "inputs"),
    ("output", "outputs"),
    ("rule", "rules"),
    ("conditions", "when"),
    ("conclusions", "then"),
    ("decisionTable", "decision_table"),
    ("table", "decision_table"),
    ("literalExpression", "literal_expression"),
    ("literal", "literal_expression"),
    ("typeRef", "type"),
    ("output_values", "values"),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    let mut previous: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut current = vec![0; s2_chars.len() + 1];

    for (i, &c1) in s1_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, &c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s2_chars.len()]
}
