//! Agent configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::{ActionId, ActionTable};
use serde::{Deserialize, Serialize};

/// File name looked up by [`AgentConfig::load_from_dir`].
pub const CONFIG_FILE: &str = "arena.yaml";

/// Behavior tree agent configuration, loaded from `arena.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Tree document (relative to the config directory until resolved)
    #[serde(default = "default_tree")]
    pub tree: PathBuf,

    /// Action emitted when the tree fails or yields no action
    #[serde(default)]
    pub fallback_action: ActionId,

    /// Action placeholder table used by `Action` nodes
    #[serde(default = "default_actions")]
    pub actions: ActionTable,
}

fn default_tree() -> PathBuf {
    PathBuf::from("trees/default_bt.yaml")
}

fn default_actions() -> ActionTable {
    [
        ("NEUTRAL_ID", 0u32),
        ("MOVE_RIGHT_ID", 1),
        ("MOVE_LEFT_ID", 2),
        ("JUMP_ID", 3),
    ]
    .into_iter()
    .collect()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tree: default_tree(),
            fallback_action: ActionId::NEUTRAL,
            actions: default_actions(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read agent config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse agent config from {}", path.display()))?;
        Ok(config)
    }

    /// Load `arena.yaml` from `dir`, or the defaults if it does not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve paths relative to `root`
    pub fn resolve_paths(&mut self, root: &Path) {
        self.tree = root.join(&self.tree);
    }
}
