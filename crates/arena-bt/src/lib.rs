//! Behavior tree runtime built on `arena-core`.
//!
//! Trees are loaded from YAML documents by the [`Loader`] and driven frame by
//! frame by a [`BtAgent`], which turns game info into one action id per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod error;
pub mod loader;
pub mod nodes;
pub mod spec;

pub use agent::{Agent, BtAgent, Decision};
pub use config::AgentConfig;
pub use error::LoadError;
pub use loader::Loader;
pub use nodes::{Action, Condition, Inverter, Node, NodeKind, Selector, Sequence};
pub use spec::{NodeSpec, RawNodeSpec, TreeDocument};

pub use arena_core::{ActionId, ActionTable, Blackboard, ConditionRegistry, GameInfo, NodeStatus};
