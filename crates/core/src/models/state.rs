use serde::{Deserialize, Serialize};

use super::expense::ExpenseRecord;
use super::inventory::InventoryState;
use super::player::PlayerState;
use super::settings::GameConfig;

/// The whole application state. Services take it (or one of its parts)
/// by reference; nothing here touches storage.
///
/// Contains the ledger (newest first), the cat's progression, the budget
/// and the breed inventory. Mood is derived and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Expense records, most recent first.
    pub expenses: Vec<ExpenseRecord>,

    pub player: PlayerState,

    pub budget: f64,

    pub inventory: InventoryState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl AppState {
    /// Fresh state for the given rules.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            expenses: Vec::new(),
            player: PlayerState::new(config),
            budget: config.default_budget,
            inventory: InventoryState::default(),
        }
    }
}
