use serde::{Deserialize, Serialize};

/// Positional facts reported by the emulator for one frame.
///
/// Every field is optional; the agent treats a missing field as `0`. Keys the
/// agent does not care about (health, timer, ...) are ignored on parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    pub x_position: Option<f64>,
    pub y_position: Option<f64>,
    pub enemy_x_position: Option<f64>,
    pub enemy_y_position: Option<f64>,
}

impl GameInfo {
    pub fn new(player: (f64, f64), enemy: (f64, f64)) -> Self {
        Self {
            x_position: Some(player.0),
            y_position: Some(player.1),
            enemy_x_position: Some(enemy.0),
            enemy_y_position: Some(enemy.1),
        }
    }
}
