use serde::{Deserialize, Serialize};

use crate::models::settings::GameConfig;

/// Progression state of the cat: level, experience and coin purse.
///
/// Invariant: `current_exp < exp_to_next_level` after every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub level: u32,
    pub current_exp: u64,
    pub exp_to_next_level: u64,
    pub coins: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl PlayerState {
    /// Fresh level-1 state for the given rules.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 1,
            current_exp: 0,
            exp_to_next_level: config.initial_exp_to_next_level.max(1),
            coins: 0,
        }
    }

    /// True when the persisted values respect the state invariants.
    pub fn is_consistent(&self) -> bool {
        self.level >= 1 && self.exp_to_next_level > 0 && self.current_exp < self.exp_to_next_level
    }

    /// Fill of the experience bar, `0..=100`.
    pub fn exp_progress_percent(&self) -> u8 {
        if self.exp_to_next_level == 0 {
            return 100;
        }
        let pct = (self.current_exp as f64 / self.exp_to_next_level as f64 * 100.0).round();
        pct.min(100.0) as u8
    }
}
