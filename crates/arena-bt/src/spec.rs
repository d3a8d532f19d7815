//! Declarative tree documents.
//!
//! A document is parsed in two steps: serde produces the untyped
//! [`RawNodeSpec`] (a `type` tag, a free-form `properties` map and child
//! specs), which [`NodeSpec::parse`] then validates into the typed
//! [`NodeSpec`]. Only the second step knows about node kinds, so every
//! configuration problem is reported as a [`LoadError`] naming the node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::{LoadError, NodeKind};

/// Stand-in for a `type` or `condition` the document leaves out.
pub(crate) const MISSING: &str = "<missing>";

/// File format: the root node lives under the top-level `node` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDocument {
    pub node: RawNodeSpec,
}

impl TreeDocument {
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNodeSpec {
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub children: Vec<RawNodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    Selector {
        name: Option<String>,
        children: Vec<NodeSpec>,
    },
    Sequence {
        name: Option<String>,
        children: Vec<NodeSpec>,
    },
    Inverter {
        name: Option<String>,
        child: Box<NodeSpec>,
    },
    Action {
        name: Option<String>,
        /// Placeholder resolved through the action table; `None` emits the
        /// neutral action.
        action: Option<String>,
        frames_needed: u32,
    },
    Condition {
        name: Option<String>,
        condition: String,
    },
}

impl NodeSpec {
    /// Validates `raw` into a typed spec. Children are parsed before their
    /// parent, so the deepest error in a subtree is the one reported.
    pub fn parse(raw: &RawNodeSpec) -> Result<Self, LoadError> {
        let mut children = raw
            .children
            .iter()
            .map(NodeSpec::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let name = raw.name.clone();
        let node_type = raw.node_type.as_deref().unwrap_or_default();
        let kind = match node_type {
            "Selector" => NodeKind::Selector,
            "Sequence" => NodeKind::Sequence,
            "Inverter" => NodeKind::Inverter,
            "Action" => NodeKind::Action,
            "Condition" => NodeKind::Condition,
            _ => {
                return Err(LoadError::UnknownNodeType {
                    name,
                    node_type: raw
                        .node_type
                        .clone()
                        .unwrap_or_else(|| MISSING.to_owned()),
                })
            }
        };

        let spec = match kind {
            NodeKind::Selector => NodeSpec::Selector { name, children },
            NodeKind::Sequence => NodeSpec::Sequence { name, children },
            NodeKind::Inverter => {
                if children.len() != 1 {
                    return Err(LoadError::invalid(
                        name.as_deref(),
                        node_type,
                        format!("expected exactly one child, found {}", children.len()),
                    ));
                }
                NodeSpec::Inverter {
                    name,
                    child: Box::new(children.remove(0)),
                }
            }
            NodeKind::Action | NodeKind::Condition => {
                if !children.is_empty() {
                    tracing::warn!(
                        node = ?name,
                        node_type,
                        children = children.len(),
                        "Leaf node has children; ignoring them"
                    );
                }
                if kind == NodeKind::Action {
                    NodeSpec::Action {
                        action: property_text(raw, "action_id"),
                        frames_needed: frames_needed(raw)?,
                        name,
                    }
                } else {
                    // A condition that names nothing can never be registered.
                    let condition = property_text(raw, "condition")
                        .unwrap_or_else(|| MISSING.to_owned());
                    NodeSpec::Condition { name, condition }
                }
            }
        };

        Ok(spec)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeSpec::Selector { .. } => NodeKind::Selector,
            NodeSpec::Sequence { .. } => NodeKind::Sequence,
            NodeSpec::Inverter { .. } => NodeKind::Inverter,
            NodeSpec::Action { .. } => NodeKind::Action,
            NodeSpec::Condition { .. } => NodeKind::Condition,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NodeSpec::Selector { name, .. }
            | NodeSpec::Sequence { name, .. }
            | NodeSpec::Inverter { name, .. }
            | NodeSpec::Action { name, .. }
            | NodeSpec::Condition { name, .. } => name.as_deref(),
        }
    }
}

impl TryFrom<&RawNodeSpec> for NodeSpec {
    type Error = LoadError;

    fn try_from(raw: &RawNodeSpec) -> Result<Self, Self::Error> {
        NodeSpec::parse(raw)
    }
}

fn node_type(raw: &RawNodeSpec) -> &str {
    raw.node_type.as_deref().unwrap_or_default()
}

/// Text form of a property. Non-string values keep a rendering of what was
/// written so lookups fail with the value the author actually wrote.
fn property_text(raw: &RawNodeSpec, key: &str) -> Option<String> {
    match raw.properties.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(format!("{other:?}")),
    }
}

fn frames_needed(raw: &RawNodeSpec) -> Result<u32, LoadError> {
    let Some(value) = raw.properties.get("frames_needed") else {
        return Ok(1);
    };

    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            LoadError::invalid(
                raw.name.as_deref(),
                node_type(raw),
                format!("invalid 'frames_needed' value: {value:?}"),
            )
        })
}
