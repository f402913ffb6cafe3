use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::player::PlayerState;
use crate::models::settings::GameConfig;

/// What a single recorded expense did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressOutcome {
    pub exp_gained: u64,
    pub coins_gained: u64,
    /// Number of level-up iterations; usually 0 or 1.
    pub levels_gained: u32,
}

impl ProgressOutcome {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Turns ledger activity into experience, coins and level-ups.
pub struct ProgressionService;

impl ProgressionService {
    pub fn new() -> Self {
        Self
    }

    /// Experience for one expense: base plus the note bonus.
    pub fn exp_gain(&self, note_has_content: bool, config: &GameConfig) -> u64 {
        config.base_exp + if note_has_content { config.note_bonus } else { 0 }
    }

    /// Credit experience and coins for a new expense, then level up as many
    /// times as the accumulated experience allows.
    pub fn on_expense_added(
        &self,
        player: &mut PlayerState,
        note_has_content: bool,
        config: &GameConfig,
    ) -> ProgressOutcome {
        let exp_gained = self.exp_gain(note_has_content, config);
        player.current_exp += exp_gained;
        player.coins += config.coins_per_expense;

        let mut levels_gained = 0;
        while player.current_exp >= player.exp_to_next_level {
            player.current_exp -= player.exp_to_next_level;
            player.level += 1;
            player.exp_to_next_level = next_threshold(player.exp_to_next_level, config.level_growth);
            levels_gained += 1;
            debug!(
                level = player.level,
                exp_to_next_level = player.exp_to_next_level,
                "level up"
            );
        }

        ProgressOutcome {
            exp_gained,
            coins_gained: config.coins_per_expense,
            levels_gained,
        }
    }

    /// Debit coins without touching experience.
    pub fn spend_coins(&self, player: &mut PlayerState, amount: u64) -> Result<(), CoreError> {
        if player.coins < amount {
            return Err(CoreError::InsufficientCoins {
                needed: amount,
                available: player.coins,
            });
        }
        player.coins -= amount;
        Ok(())
    }
}

impl Default for ProgressionService {
    fn default() -> Self {
        Self::new()
    }
}

/// `round(threshold × growth)`, never below 1 so the level-up loop terminates.
fn next_threshold(threshold: u64, growth: f64) -> u64 {
    let next = (threshold as f64 * growth).round();
    if next.is_finite() && next >= 1.0 {
        next as u64
    } else {
        1
    }
}
