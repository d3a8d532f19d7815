use thiserror::Error;

/// Errors raised while turning a tree document into a [`Node`](crate::Node).
///
/// Construction is all-or-nothing: when any of these is returned, no part of
/// the tree is handed back to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown node type `{node_type}` (node {name:?})")]
    UnknownNodeType {
        name: Option<String>,
        node_type: String,
    },
    #[error("{node_type} node {name:?} has an invalid configuration: {reason}")]
    InvalidConfiguration {
        name: Option<String>,
        node_type: String,
        reason: String,
    },
    #[error("condition `{condition}` is not registered (node {name:?})")]
    UnknownCondition {
        name: Option<String>,
        condition: String,
    },
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn invalid(
        name: Option<&str>,
        node_type: &str,
        reason: impl Into<String>,
    ) -> Self {
        LoadError::InvalidConfiguration {
            name: name.map(str::to_owned),
            node_type: node_type.to_owned(),
            reason: reason.into(),
        }
    }

    /// Attributes a node-level error to the named node.
    pub(crate) fn for_node(self, node: Option<&str>) -> Self {
        let node = node.map(str::to_owned);
        match self {
            LoadError::UnknownNodeType { node_type, .. } => LoadError::UnknownNodeType {
                name: node,
                node_type,
            },
            LoadError::InvalidConfiguration {
                node_type, reason, ..
            } => LoadError::InvalidConfiguration {
                name: node,
                node_type,
                reason,
            },
            LoadError::UnknownCondition { condition, .. } => LoadError::UnknownCondition {
                name: node,
                condition,
            },
            other => other,
        }
    }
}
