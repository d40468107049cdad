//! Model transformer
//!
//! Turns a model document into linked, immutable decisions. The engine only
//! talks to the [`ModelTransformer`] trait; [`YamlModelTransformer`] reads the
//! YAML model format.

use crate::decision_parser::{DecisionDefinition, DecisionParser};
use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use decisio_core::{Decision, DecisionRequirementsGraph};
use std::collections::HashMap;
use std::sync::Arc;

const DOCUMENT_FIELDS: &[&str] = &["version", "definitions", "decisions"];
const DEFINITIONS_FIELDS: &[&str] = &["id", "name", "namespace"];

/// Key used for a model document without a `definitions` header
pub const DEFAULT_DRG_KEY: &str = "definitions";

/// Transforms model source text into decisions
pub trait ModelTransformer: Send + Sync {
    /// Transform all decisions of a model document, in document order
    fn transform_decisions(&self, source: &str) -> Result<Vec<Arc<Decision>>> {
        Ok(self.transform_decision_requirements_graph(source)?.decisions)
    }

    /// Transform a model document into its decision requirements graph
    fn transform_decision_requirements_graph(
        &self,
        source: &str,
    ) -> Result<DecisionRequirementsGraph>;
}

/// Model transformer for the YAML model format
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlModelTransformer;

impl YamlModelTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl ModelTransformer for YamlModelTransformer {
    fn transform_decision_requirements_graph(
        &self,
        source: &str,
    ) -> Result<DecisionRequirementsGraph> {
        let document = YamlParser::parse(source)?;
        YamlParser::warn_unknown_fields(&document, DOCUMENT_FIELDS, "model document");

        let (key, name) = match document.get("definitions") {
            Some(header) => {
                YamlParser::warn_unknown_fields(header, DEFINITIONS_FIELDS, "definitions");
                (
                    YamlParser::get_string(header, "id")?,
                    YamlParser::get_optional_string(header, "name"),
                )
            }
            None => (DEFAULT_DRG_KEY.to_string(), None),
        };

        let definitions = YamlParser::get_array(&document, "decisions")?
            .iter()
            .map(DecisionParser::parse_from_yaml)
            .collect::<Result<Vec<_>>>()?;

        let decisions = DecisionLinker::new(definitions)?.link()?;
        log::info!(
            "Transformed {} decision(s) of model '{}'",
            decisions.len(),
            key
        );

        Ok(DecisionRequirementsGraph {
            key,
            name,
            decisions,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Pending,
    InProgress,
    Done,
}

/// Builds decisions dependency-first so each required decision is one
/// shared `Arc`, and rejects requirement loops.
struct DecisionLinker {
    definitions: Vec<Option<DecisionDefinition>>,
    requires: Vec<Vec<String>>,
    keys: Vec<String>,
    index: HashMap<String, usize>,
    states: Vec<LinkState>,
    built: Vec<Option<Arc<Decision>>>,
}

impl DecisionLinker {
    fn new(definitions: Vec<DecisionDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, definition) in definitions.iter().enumerate() {
            if index.insert(definition.key.clone(), i).is_some() {
                return Err(ParseError::DuplicateDecision(definition.key.clone()));
            }
        }

        let count = definitions.len();
        Ok(Self {
            requires: definitions.iter().map(|d| d.requires.clone()).collect(),
            keys: definitions.iter().map(|d| d.key.clone()).collect(),
            definitions: definitions.into_iter().map(Some).collect(),
            index,
            states: vec![LinkState::Pending; count],
            built: vec![None; count],
        })
    }

    /// Link every decision, returning them in document order
    fn link(mut self) -> Result<Vec<Arc<Decision>>> {
        for i in 0..self.definitions.len() {
            self.build(i)?;
        }

        self.built
            .into_iter()
            .zip(self.keys)
            .map(|(decision, key)| {
                decision.ok_or(ParseError::RequirementLoop { decision: key })
            })
            .collect()
    }

    fn build(&mut self, i: usize) -> Result<Arc<Decision>> {
        match self.states[i] {
            LinkState::Done => {
                if let Some(decision) = &self.built[i] {
                    return Ok(decision.clone());
                }
            }
            LinkState::InProgress => {
                return Err(ParseError::RequirementLoop {
                    decision: self.keys[i].clone(),
                })
            }
            LinkState::Pending => {}
        }

        self.states[i] = LinkState::InProgress;

        let mut required_decisions = Vec::with_capacity(self.requires[i].len());
        for required in self.requires[i].clone() {
            let Some(&j) = self.index.get(&required) else {
                return Err(ParseError::MissingRequiredDecision {
                    decision: self.keys[i].clone(),
                    required,
                });
            };
            required_decisions.push(self.build(j)?);
        }

        let definition = self.definitions[i].take().ok_or_else(|| ParseError::RequirementLoop {
            decision: self.keys[i].clone(),
        })?;

        let decision = Arc::new(Decision {
            key: definition.key,
            name: definition.name,
            logic: definition.logic,
            required_decisions,
        });

        self.states[i] = LinkState::Done;
        self.built[i] = Some(decision.clone());
        Ok(decision)
    }
}
