use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete action code handed to the game-stepping loop.
///
/// The id only identifies *which* button combination to press; the mapping
/// from combinations to ids is owned by whoever builds the [`ActionTable`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl ActionId {
    /// The no-op action (no buttons pressed).
    pub const NEUTRAL: ActionId = ActionId(0);

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ActionId {
    fn from(value: u32) -> Self {
        ActionId(value)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup table from symbolic action placeholders (e.g. `MOVE_RIGHT_ID`) to
/// concrete action ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionTable {
    ids: BTreeMap<String, ActionId>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<ActionId>) -> Option<ActionId> {
        self.ids.insert(name.into(), id.into())
    }

    pub fn get(&self, name: &str) -> Option<ActionId> {
        self.ids.get(name).copied()
    }

    /// Resolves a placeholder, mapping unknown names to [`ActionId::NEUTRAL`].
    pub fn resolve(&self, name: &str) -> ActionId {
        self.get(name).unwrap_or(ActionId::NEUTRAL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ActionId)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K, V> FromIterator<(K, V)> for ActionTable
where
    K: Into<String>,
    V: Into<ActionId>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            ids: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
