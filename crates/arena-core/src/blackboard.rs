use crate::GameInfo;

/// Flat record of positional facts read by condition nodes.
///
/// The driver overwrites all fields once per frame; nodes never write to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Blackboard {
    pub player_x: f64,
    pub player_y: f64,
    pub enemy_x: f64,
    pub enemy_y: f64,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every field from `info`. Missing fields become `0`.
    pub fn overwrite(&mut self, info: &GameInfo) {
        *self = Self {
            player_x: info.x_position.unwrap_or(0.0),
            player_y: info.y_position.unwrap_or(0.0),
            enemy_x: info.enemy_x_position.unwrap_or(0.0),
            enemy_y: info.enemy_y_position.unwrap_or(0.0),
        };
    }

    /// Horizontal distance between the two fighters.
    pub fn distance_x(&self) -> f64 {
        (self.player_x - self.enemy_x).abs()
    }
}

impl From<&GameInfo> for Blackboard {
    fn from(info: &GameInfo) -> Self {
        let mut bb = Self::default();
        bb.overwrite(info);
        bb
    }
}
