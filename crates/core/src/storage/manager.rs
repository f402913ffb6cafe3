use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::expense::{normalize_note, Category, ExpenseId, ExpenseRecord};
use crate::models::inventory::InventoryState;
use crate::models::player::PlayerState;
use crate::models::settings::GameConfig;
use crate::models::state::AppState;

use super::kv::KeyValueStore;

/// Reads and writes the four named JSON blobs.
///
/// Loads never fail: a missing, unreadable or corrupt blob yields the
/// documented default. Saves report errors and leave it to the caller
/// whether to surface them.
pub struct StorageManager;

impl StorageManager {
    /// Load the ledger record by record.
    ///
    /// Records that fail to decode or violate the ledger invariants are
    /// dropped with a warning; the rest of the ledger is kept. Records in the
    /// older browser shape (ISO timestamp in `date`, no `createdAt`) are
    /// upgraded on the way in.
    pub fn load_expenses(store: &dyn KeyValueStore, config: &GameConfig) -> Vec<ExpenseRecord> {
        let key = config.expenses_key();
        let Some(raw) = load_blob::<Vec<Value>>(store, &key) else {
            return Vec::new();
        };
        let mut records = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match decode_expense(value) {
                Ok(record) => records.push(record),
                Err(reason) => warn!(key = %key, index, %reason, "discarded stored expense"),
            }
        }
        records
    }

    pub fn save_expenses(
        store: &mut dyn KeyValueStore,
        config: &GameConfig,
        expenses: &[ExpenseRecord],
    ) -> Result<(), CoreError> {
        save_blob(store, &config.expenses_key(), expenses)
    }

    /// Load the player; an inconsistent player counts as corrupt.
    pub fn load_player(store: &dyn KeyValueStore, config: &GameConfig) -> PlayerState {
        let key = config.player_key();
        match load_blob::<PlayerState>(store, &key) {
            Some(player) if player.is_consistent() => player,
            Some(player) => {
                warn!(key = %key, ?player, "stored player violates invariants, using default");
                PlayerState::new(config)
            }
            None => PlayerState::new(config),
        }
    }

    pub fn save_player(
        store: &mut dyn KeyValueStore,
        config: &GameConfig,
        player: &PlayerState,
    ) -> Result<(), CoreError> {
        save_blob(store, &config.player_key(), player)
    }

    pub fn load_budget(store: &dyn KeyValueStore, config: &GameConfig) -> f64 {
        let key = config.budget_key();
        match load_blob::<f64>(store, &key) {
            Some(budget) if budget.is_finite() && budget > 0.0 => budget,
            Some(budget) => {
                warn!(key = %key, budget, "stored budget is not positive, using default");
                config.default_budget
            }
            None => config.default_budget,
        }
    }

    pub fn save_budget(
        store: &mut dyn KeyValueStore,
        config: &GameConfig,
        budget: f64,
    ) -> Result<(), CoreError> {
        save_blob(store, &config.budget_key(), &budget)
    }

    /// Load the inventory, repairing a missing starter or a dangling `current`.
    pub fn load_inventory(store: &dyn KeyValueStore, config: &GameConfig) -> InventoryState {
        let key = config.inventory_key();
        let mut inventory = load_blob::<InventoryState>(store, &key).unwrap_or_default();
        if inventory.repair() {
            warn!(key = %key, "repaired stored inventory");
        }
        inventory
    }

    pub fn save_inventory(
        store: &mut dyn KeyValueStore,
        config: &GameConfig,
        inventory: &InventoryState,
    ) -> Result<(), CoreError> {
        save_blob(store, &config.inventory_key(), inventory)
    }

    /// Load all four blobs.
    pub fn load_state(store: &dyn KeyValueStore, config: &GameConfig) -> AppState {
        AppState {
            expenses: Self::load_expenses(store, config),
            player: Self::load_player(store, config),
            budget: Self::load_budget(store, config),
            inventory: Self::load_inventory(store, config),
        }
    }

    /// Write all four blobs. Stops at the first failure.
    pub fn save_state(
        store: &mut dyn KeyValueStore,
        config: &GameConfig,
        state: &AppState,
    ) -> Result<(), CoreError> {
        Self::save_expenses(store, config, &state.expenses)?;
        Self::save_player(store, config, &state.player)?;
        Self::save_budget(store, config, state.budget)?;
        Self::save_inventory(store, config, &state.inventory)?;
        Ok(())
    }

    /// Remove every key owned by `config`. Attempts all keys even if one fails.
    pub fn clear(store: &mut dyn KeyValueStore, config: &GameConfig) -> Result<(), CoreError> {
        let mut first_error = None;
        for key in config.all_keys() {
            if let Err(e) = store.remove(&key) {
                warn!(key = %key, error = %e, "failed to remove stored blob");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn load_blob<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored blob");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read stored blob, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored blob is corrupt, using default");
            None
        }
    }
}

fn save_blob<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let json = serde_json::to_string(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize '{key}': {e}")))?;
    store.set(key, &json)
}

// ── Stored expense records ──────────────────────────────────────────

/// Permissive view of one stored record. Covers the current shape and the
/// older browser shape where `date` is a full ISO timestamp and
/// `createdAt` is absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredExpense {
    id: ExpenseId,
    amount: f64,
    category: Category,
    #[serde(default)]
    note: Option<String>,
    date: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

fn decode_expense(value: Value) -> Result<ExpenseRecord, String> {
    let stored: StoredExpense = serde_json::from_value(value).map_err(|e| e.to_string())?;

    if !stored.amount.is_finite() || stored.amount <= 0.0 {
        return Err(format!("invalid amount {}", stored.amount));
    }

    let day = stored
        .date
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| format!("invalid date '{}'", stored.date))?;

    let created_at = stored
        .created_at
        .or_else(|| {
            DateTime::parse_from_rfc3339(&stored.date)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        })
        .or_else(|| day.and_hms_opt(0, 0, 0).map(|t| t.and_utc()))
        .ok_or_else(|| format!("no timestamp for '{}'", stored.date))?;

    Ok(ExpenseRecord {
        id: stored.id,
        amount: stored.amount,
        category: stored.category,
        note: normalize_note(stored.note.as_deref()),
        date: day,
        created_at,
    })
}
