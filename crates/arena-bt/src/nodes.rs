use std::fmt;

use arena_core::{ActionId, Blackboard, ConditionRegistry, NodeStatus, Predicate};

use crate::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Action,
    Condition,
    Sequence,
    Selector,
    Inverter,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Action => "Action",
            NodeKind::Condition => "Condition",
            NodeKind::Sequence => "Sequence",
            NodeKind::Selector => "Selector",
            NodeKind::Inverter => "Inverter",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A behavior tree node.
///
/// The set of node kinds is closed. Composites and the decorator own their
/// children outright, so a `Node` is always a tree: no sharing, no cycles.
///
/// Only the progress counters (`elapsed_frames` on actions, the active child
/// index on composites) change while ticking; the structure is fixed once built.
#[derive(Debug)]
pub enum Node {
    Action(Action),
    Condition(Condition),
    Sequence(Sequence),
    Selector(Selector),
    Inverter(Inverter),
}

impl Node {
    /// Evaluates this node (and, transitively, its subtree) for one frame.
    ///
    /// Never mutates the blackboard.
    pub fn tick(&mut self, blackboard: &Blackboard) -> NodeStatus {
        match self {
            Node::Action(n) => n.tick(),
            Node::Condition(n) => n.tick(blackboard),
            Node::Sequence(n) => n.tick(blackboard),
            Node::Selector(n) => n.tick(blackboard),
            Node::Inverter(n) => n.tick(blackboard),
        }
    }

    /// The action currently "in flight" below this node, if any.
    ///
    /// Safe to call at any time, including before the first tick.
    pub fn action_id(&self) -> Option<ActionId> {
        match self {
            Node::Action(n) => Some(n.action_id()),
            Node::Condition(_) => None,
            Node::Sequence(n) => n.action_id(),
            Node::Selector(n) => n.action_id(),
            Node::Inverter(n) => n.action_id(),
        }
    }

    /// Returns the subtree to its freshly-constructed state. Idempotent.
    pub fn reset(&mut self) {
        match self {
            Node::Action(n) => n.reset(),
            Node::Condition(_) => {}
            Node::Sequence(n) => n.reset(),
            Node::Selector(n) => n.reset(),
            Node::Inverter(n) => n.reset(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Action(_) => NodeKind::Action,
            Node::Condition(_) => NodeKind::Condition,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Selector(_) => NodeKind::Selector,
            Node::Inverter(_) => NodeKind::Inverter,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Action(n) => n.name.as_deref(),
            Node::Condition(n) => n.name.as_deref(),
            Node::Sequence(n) => n.name.as_deref(),
            Node::Selector(n) => n.name.as_deref(),
            Node::Inverter(n) => n.name.as_deref(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Action(_) | Node::Condition(_) => &[],
            Node::Sequence(n) => &n.children,
            Node::Selector(n) => &n.children,
            Node::Inverter(n) => std::slice::from_ref(&*n.child),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

impl From<Action> for Node {
    fn from(value: Action) -> Self {
        Node::Action(value)
    }
}

impl From<Condition> for Node {
    fn from(value: Condition) -> Self {
        Node::Condition(value)
    }
}

impl From<Sequence> for Node {
    fn from(value: Sequence) -> Self {
        Node::Sequence(value)
    }
}

impl From<Selector> for Node {
    fn from(value: Selector) -> Self {
        Node::Selector(value)
    }
}

impl From<Inverter> for Node {
    fn from(value: Inverter) -> Self {
        Node::Inverter(value)
    }
}

/// Emits one action id for a fixed number of frames.
///
/// Ticking yields `frames_needed` consecutive `Running` results followed by a
/// single `Success`, after which the cycle starts over.
#[derive(Debug, Clone)]
pub struct Action {
    name: Option<String>,
    action_id: ActionId,
    frames_needed: u32,
    elapsed_frames: u32,
}

impl Action {
    pub fn new(action_id: ActionId, frames_needed: u32) -> Result<Self, LoadError> {
        if frames_needed < 1 {
            return Err(LoadError::invalid(
                None,
                NodeKind::Action.as_str(),
                format!("frames_needed must be at least 1, got {frames_needed}"),
            ));
        }
        Ok(Self {
            name: None,
            action_id,
            frames_needed,
            elapsed_frames: 0,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn action_id(&self) -> ActionId {
        self.action_id
    }

    pub fn frames_needed(&self) -> u32 {
        self.frames_needed
    }

    pub fn elapsed_frames(&self) -> u32 {
        self.elapsed_frames
    }

    fn tick(&mut self) -> NodeStatus {
        if self.elapsed_frames < self.frames_needed {
            self.elapsed_frames += 1;
            NodeStatus::Running
        } else {
            self.elapsed_frames = 0;
            NodeStatus::Success
        }
    }

    fn reset(&mut self) {
        self.elapsed_frames = 0;
    }
}

/// Stateless predicate over the blackboard. Never returns `Running`.
#[derive(Clone)]
pub struct Condition {
    name: Option<String>,
    condition: Option<String>,
    predicate: Predicate,
}

impl Condition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Blackboard) -> bool + Send + Sync + 'static,
    {
        Self::from_predicate(std::sync::Arc::new(predicate))
    }

    pub fn from_predicate(predicate: Predicate) -> Self {
        Self {
            name: None,
            condition: None,
            predicate,
        }
    }

    /// Looks `condition` up in `registry`.
    pub fn from_registry(condition: &str, registry: &ConditionRegistry) -> Result<Self, LoadError> {
        let predicate = registry
            .get(condition)
            .ok_or_else(|| LoadError::UnknownCondition {
                name: None,
                condition: condition.to_owned(),
            })?;
        Ok(Self {
            name: None,
            condition: Some(condition.to_owned()),
            predicate,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Registry name of the predicate, when built from a registry.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    fn tick(&self, blackboard: &Blackboard) -> NodeStatus {
        NodeStatus::from((self.predicate)(blackboard))
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("name", &self.name)
            .field("condition", &self.condition)
            .finish_non_exhaustive()
    }
}

/// Ticks children in order, abandoning on the first failure.
///
/// A child that succeeds immediately cascades into the next child within the
/// same tick.
#[derive(Debug)]
pub struct Sequence {
    name: Option<String>,
    children: Vec<Node>,
    index: usize,
}

impl Sequence {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            name: None,
            children,
            index: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn tick(&mut self, blackboard: &Blackboard) -> NodeStatus {
        while self.index < self.children.len() {
            match self.children[self.index].tick(blackboard) {
                NodeStatus::Running => return NodeStatus::Running,
                NodeStatus::Failure => {
                    self.reset();
                    return NodeStatus::Failure;
                }
                NodeStatus::Success => self.index += 1,
            }
        }

        self.reset();
        NodeStatus::Success
    }

    // Falls back to the first child so the id stays meaningful right after
    // the sequence completes and rewinds.
    fn action_id(&self) -> Option<ActionId> {
        self.children
            .get(self.index)
            .or_else(|| self.children.first())
            .and_then(Node::action_id)
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Ticks children in priority order until one does not fail.
///
/// The selector does not remember which child succeeded: the next tick after
/// a terminal result starts again from the first child.
#[derive(Debug)]
pub struct Selector {
    name: Option<String>,
    children: Vec<Node>,
    index: usize,
}

impl Selector {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            name: None,
            children,
            index: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn tick(&mut self, blackboard: &Blackboard) -> NodeStatus {
        while self.index < self.children.len() {
            match self.children[self.index].tick(blackboard) {
                NodeStatus::Running => return NodeStatus::Running,
                NodeStatus::Success => {
                    self.index = 0;
                    return NodeStatus::Success;
                }
                NodeStatus::Failure => self.index += 1,
            }
        }

        self.index = 0;
        NodeStatus::Failure
    }

    fn action_id(&self) -> Option<ActionId> {
        self.children.get(self.index).and_then(Node::action_id)
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Swaps `Success` and `Failure` of its child; `Running` passes through.
///
/// The child's action id is forwarded unchanged, even when the inverted
/// status is `Failure`.
#[derive(Debug)]
pub struct Inverter {
    name: Option<String>,
    child: Box<Node>,
}

impl Inverter {
    pub fn new(child: impl Into<Node>) -> Self {
        Self {
            name: None,
            child: Box::new(child.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn child(&self) -> &Node {
        &self.child
    }

    fn tick(&mut self, blackboard: &Blackboard) -> NodeStatus {
        self.child.tick(blackboard).invert()
    }

    fn action_id(&self) -> Option<ActionId> {
        self.child.action_id()
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}
