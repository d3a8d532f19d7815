//! Engine-agnostic primitives shared by the arena behavior tree runtime.
//!
//! Nothing in this crate performs I/O. The tree runtime lives in `arena-bt`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod blackboard;
pub mod condition;
pub mod info;
pub mod status;

pub use action::{ActionId, ActionTable};
pub use blackboard::Blackboard;
pub use condition::{ConditionRegistry, Predicate};
pub use info::GameInfo;
pub use status::NodeStatus;
