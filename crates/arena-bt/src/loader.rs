use std::path::Path;

use arena_core::{ActionId, ActionTable, ConditionRegistry};

use crate::nodes::{Action, Condition, Inverter, Selector, Sequence};
use crate::spec::{NodeSpec, RawNodeSpec, TreeDocument};
use crate::{LoadError, Node};

/// Materializes [`Node`] trees from declarative specs.
///
/// Both lookup tables are borrowed from the caller; the loader keeps no other
/// state, so one loader can build any number of independent trees.
#[derive(Debug, Clone, Copy)]
pub struct Loader<'a> {
    conditions: &'a ConditionRegistry,
    actions: &'a ActionTable,
}

impl<'a> Loader<'a> {
    pub fn new(conditions: &'a ConditionRegistry, actions: &'a ActionTable) -> Self {
        Self {
            conditions,
            actions,
        }
    }

    /// Builds a tree from a validated spec, children first.
    pub fn build(&self, spec: &NodeSpec) -> Result<Node, LoadError> {
        let node = match spec {
            NodeSpec::Selector { name, children } => {
                let mut selector = Selector::new(self.build_all(children)?);
                if let Some(name) = name {
                    selector = selector.with_name(name);
                }
                Node::Selector(selector)
            }
            NodeSpec::Sequence { name, children } => {
                let mut sequence = Sequence::new(self.build_all(children)?);
                if let Some(name) = name {
                    sequence = sequence.with_name(name);
                }
                Node::Sequence(sequence)
            }
            NodeSpec::Inverter { name, child } => {
                let mut inverter = Inverter::new(self.build(child)?);
                if let Some(name) = name {
                    inverter = inverter.with_name(name);
                }
                Node::Inverter(inverter)
            }
            NodeSpec::Action {
                name,
                action,
                frames_needed,
            } => {
                let action_id = self.resolve_action(name.as_deref(), action.as_deref());
                let mut node = Action::new(action_id, *frames_needed)
                    .map_err(|err| err.for_node(name.as_deref()))?;
                if let Some(name) = name {
                    node = node.with_name(name);
                }
                Node::Action(node)
            }
            NodeSpec::Condition { name, condition } => {
                let mut node = Condition::from_registry(condition, self.conditions)
                    .map_err(|err| err.for_node(name.as_deref()))?;
                if let Some(name) = name {
                    node = node.with_name(name);
                }
                Node::Condition(node)
            }
        };
        Ok(node)
    }

    /// Validates and builds an untyped spec.
    pub fn build_raw(&self, raw: &RawNodeSpec) -> Result<Node, LoadError> {
        self.build(&NodeSpec::parse(raw)?)
    }

    /// Builds the tree described by a YAML document (root under `node`).
    pub fn load_str(&self, yaml: &str) -> Result<Node, LoadError> {
        let document = TreeDocument::from_yaml(yaml)?;
        let root = self.build_raw(&document.node)?;
        tracing::debug!(
            root = root.name().unwrap_or(root.kind().as_str()),
            nodes = root.node_count(),
            "Loaded behavior tree"
        );
        Ok(root)
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Node, LoadError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading behavior tree");
        let yaml = std::fs::read_to_string(path)?;
        self.load_str(&yaml)
    }

    fn build_all(&self, specs: &[NodeSpec]) -> Result<Vec<Node>, LoadError> {
        specs.iter().map(|s| self.build(s)).collect()
    }

    fn resolve_action(&self, node: Option<&str>, placeholder: Option<&str>) -> ActionId {
        let Some(placeholder) = placeholder else {
            tracing::warn!(node = ?node, "Action node has no action_id; using neutral action");
            return ActionId::NEUTRAL;
        };
        if !self.actions.contains(placeholder) {
            tracing::warn!(
                node = ?node,
                action = placeholder,
                "Unknown action placeholder; using neutral action"
            );
        }
        self.actions.resolve(placeholder)
    }
}
