//! Named blackboard predicates.
//!
//! Trees refer to conditions by name; the loader resolves those names through a
//! [`ConditionRegistry`] handed to it by the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::Blackboard;

/// A read-only test over the blackboard.
pub type Predicate = Arc<dyn Fn(&Blackboard) -> bool + Send + Sync>;

/// Horizontal distance (in game units) inside which the fighters count as close.
pub const CLOSE_RANGE: f64 = 50.0;

#[derive(Clone, Default)]
pub struct ConditionRegistry {
    predicates: BTreeMap<String, Predicate>,
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the positional predicates every tree can use.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("is_enemy_to_the_right", is_enemy_to_the_right);
        registry.register("is_enemy_to_the_left", is_enemy_to_the_left);
        registry.register("is_close_to_enemy", is_close_to_enemy);
        registry
    }

    /// Registers `predicate` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Blackboard) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
        self
    }

    pub fn get(&self, name: &str) -> Option<Predicate> {
        self.predicates.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// The enemy stands more than [`CLOSE_RANGE`] to the player's right.
pub fn is_enemy_to_the_right(bb: &Blackboard) -> bool {
    bb.player_x < bb.enemy_x - CLOSE_RANGE
}

/// The enemy stands more than [`CLOSE_RANGE`] to the player's left.
pub fn is_enemy_to_the_left(bb: &Blackboard) -> bool {
    bb.player_x > bb.enemy_x + CLOSE_RANGE
}

pub fn is_close_to_enemy(bb: &Blackboard) -> bool {
    bb.distance_x() <= CLOSE_RANGE
}
