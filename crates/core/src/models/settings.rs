use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Tunable game rules and persistence settings.
///
/// The defaults reproduce the behaviour of the browser build; tests and
/// embedders may override individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Experience granted for every recorded expense.
    pub base_exp: u64,

    /// Extra experience when the expense carries a non-empty note.
    pub note_bonus: u64,

    /// Coins granted for every recorded expense.
    pub coins_per_expense: u64,

    /// Experience needed to leave level 1.
    pub initial_exp_to_next_level: u64,

    /// Multiplier applied to the threshold on each level-up (result is rounded).
    pub level_growth: f64,

    /// Budget used until the user sets one.
    pub default_budget: f64,

    /// Price increment between consecutive manifest breeds (25, 50, 75, ...).
    pub manifest_price_step: u64,

    /// Pie slices below this fraction of the month total hide their label.
    pub label_threshold: f64,

    /// How long a transient notice stays visible, in milliseconds.
    pub notice_duration_ms: u64,

    /// Prefix of every storage key (`<prefix>_expenses`, `<prefix>_player`, ...).
    pub storage_prefix: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_exp: 5,
            note_bonus: 2,
            coins_per_expense: 1,
            initial_exp_to_next_level: 100,
            level_growth: 1.5,
            default_budget: 1000.0,
            manifest_price_step: 25,
            label_threshold: 0.05,
            notice_duration_ms: 2500,
            storage_prefix: "cat_island".to_string(),
        }
    }
}

impl GameConfig {
    /// Reject configurations that would break the progression invariants.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.initial_exp_to_next_level == 0 {
            return Err(CoreError::Validation(
                "initial_exp_to_next_level must be positive".into(),
            ));
        }
        if !self.level_growth.is_finite() || self.level_growth < 1.0 {
            return Err(CoreError::Validation(format!(
                "level_growth must be a finite number >= 1 (got {})",
                self.level_growth
            )));
        }
        if !self.default_budget.is_finite() || self.default_budget <= 0.0 {
            return Err(CoreError::Validation(format!(
                "default_budget must be positive (got {})",
                self.default_budget
            )));
        }
        if !(0.0..=1.0).contains(&self.label_threshold) {
            return Err(CoreError::Validation(format!(
                "label_threshold must be within 0..=1 (got {})",
                self.label_threshold
            )));
        }
        if self.storage_prefix.trim().is_empty() {
            return Err(CoreError::Validation("storage_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn expenses_key(&self) -> String {
        format!("{}_expenses", self.storage_prefix)
    }

    pub fn player_key(&self) -> String {
        format!("{}_player", self.storage_prefix)
    }

    pub fn budget_key(&self) -> String {
        format!("{}_budget", self.storage_prefix)
    }

    pub fn inventory_key(&self) -> String {
        format!("{}_inventory", self.storage_prefix)
    }

    /// All keys owned by this configuration, in a stable order.
    pub fn all_keys(&self) -> [String; 4] {
        [
            self.expenses_key(),
            self.player_key(),
            self.budget_key(),
            self.inventory_key(),
        ]
    }
}
