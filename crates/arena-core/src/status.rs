//! Status returned by behavior tree nodes.

use serde::{Deserialize, Serialize};

/// The result of ticking a node once.
///
/// `Running` is the only non-terminal status: the node has more work to do
/// and expects to be ticked again on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Running,
    Success,
    Failure,
}

impl NodeStatus {
    /// Returns `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, NodeStatus::Running)
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, NodeStatus::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, NodeStatus::Failure)
    }

    /// Swaps `Success` and `Failure`. `Running` is left unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            NodeStatus::Running => NodeStatus::Running,
            NodeStatus::Success => NodeStatus::Failure,
            NodeStatus::Failure => NodeStatus::Success,
        }
    }
}

impl From<bool> for NodeStatus {
    fn from(value: bool) -> Self {
        if value {
            NodeStatus::Success
        } else {
            NodeStatus::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_running() {
        assert_eq!(NodeStatus::Running.invert(), NodeStatus::Running);
        assert_eq!(NodeStatus::Success.invert(), NodeStatus::Failure);
        assert_eq!(NodeStatus::Failure.invert(), NodeStatus::Success);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!NodeStatus::Running.is_terminal());
        assert!(NodeStatus::Success.is_terminal());
        assert!(NodeStatus::Failure.is_terminal());
    }
}
