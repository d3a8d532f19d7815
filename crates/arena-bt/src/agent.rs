use arena_core::{ActionId, Blackboard, ConditionRegistry, GameInfo, NodeStatus};
use serde::Serialize;

use crate::{AgentConfig, LoadError, Loader, Node};

/// Anything that turns a frame of game info into an action code.
pub trait Agent {
    fn select_action(&mut self, info: &GameInfo) -> ActionId;
}

/// Outcome of a single [`BtAgent::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub frame: u64,
    pub status: NodeStatus,
    pub action: ActionId,
}

/// Drives one behavior tree against its own blackboard, one tick per frame.
///
/// Each agent owns its tree and blackboard exclusively; two players need two
/// agents.
#[derive(Debug)]
pub struct BtAgent {
    root: Node,
    blackboard: Blackboard,
    fallback: ActionId,
    last: NodeStatus,
    frame: u64,
}

impl BtAgent {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            blackboard: Blackboard::new(),
            fallback: ActionId::NEUTRAL,
            last: NodeStatus::Running,
            frame: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: ActionId) -> Self {
        self.fallback = fallback;
        self
    }

    /// Loads the configured tree, resolving conditions through `conditions`.
    pub fn from_config(
        config: &AgentConfig,
        conditions: &ConditionRegistry,
    ) -> Result<Self, LoadError> {
        let root = Loader::new(conditions, &config.actions).load_file(&config.tree)?;
        Ok(Self::new(root).with_fallback(config.fallback_action))
    }

    pub fn update_blackboard(&mut self, info: &GameInfo) {
        self.blackboard.overwrite(info);
    }

    /// Advances the tree by one frame.
    ///
    /// A terminal root status rewinds the whole tree so the next frame starts
    /// from the top. `Failure`, or a tick that yields no action id, emits the
    /// fallback action.
    pub fn tick(&mut self, info: &GameInfo) -> Decision {
        self.update_blackboard(info);

        let status = self.root.tick(&self.blackboard);
        let action_id = self.root.action_id();

        if status.is_terminal() {
            self.root.reset();
        }
        self.last = status;

        let action = match (status, action_id) {
            (NodeStatus::Failure, _) | (_, None) => self.fallback,
            (_, Some(id)) => id,
        };

        let decision = Decision {
            frame: self.frame,
            status,
            action,
        };
        self.frame += 1;

        tracing::trace!(
            frame = decision.frame,
            status = ?decision.status,
            action = %decision.action,
            "Agent tick"
        );
        decision
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn fallback(&self) -> ActionId {
        self.fallback
    }

    /// Status of the most recent tick (`Running` before the first one).
    pub fn last_status(&self) -> NodeStatus {
        self.last
    }

    /// Number of ticks performed so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Agent for BtAgent {
    fn select_action(&mut self, info: &GameInfo) -> ActionId {
        self.tick(info).action
    }
}
