use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::mood::Mood;

/// Identifier of the breed every player owns from the start.
pub const STARTER_BREED: &str = "orange";

/// A purchasable cosmetic skin for the cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
    /// Price in coins; the starter costs nothing.
    pub price: u64,
    /// Mood → asset reference (image path or URL).
    #[serde(default)]
    pub images: BTreeMap<Mood, String>,
}

impl Breed {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

/// Breeds the player owns and the one currently equipped.
///
/// Invariant: `owned` contains the starter breed and `current` is a member of `owned`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    pub owned: BTreeSet<String>,
    pub current: String,
}

impl Default for InventoryState {
    fn default() -> Self {
        let mut owned = BTreeSet::new();
        owned.insert(STARTER_BREED.to_string());
        Self {
            owned,
            current: STARTER_BREED.to_string(),
        }
    }
}

impl InventoryState {
    pub fn owns(&self, breed_id: &str) -> bool {
        self.owned.contains(breed_id)
    }

    /// Restore the invariants on a value read from storage.
    /// Returns `true` if anything had to be repaired.
    pub fn repair(&mut self) -> bool {
        let mut repaired = self.owned.insert(STARTER_BREED.to_string());
        if !self.owned.contains(&self.current) {
            self.current = STARTER_BREED.to_string();
            repaired = true;
        }
        repaired
    }
}
