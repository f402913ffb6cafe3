use tracing::debug;

use crate::catalog::traits::BreedCatalog;
use crate::errors::CoreError;
use crate::models::inventory::InventoryState;
use crate::models::player::PlayerState;
use crate::services::progression_service::ProgressionService;

/// Buying and equipping breeds.
pub struct ShopService {
    progression_service: ProgressionService,
}

impl ShopService {
    pub fn new() -> Self {
        Self {
            progression_service: ProgressionService::new(),
        }
    }

    /// Buy `breed_id` and equip it. Returns the price paid.
    ///
    /// Nothing changes unless every check passes: the breed must exist,
    /// must not be owned yet, and must be affordable.
    pub fn purchase(
        &self,
        player: &mut PlayerState,
        inventory: &mut InventoryState,
        catalog: &dyn BreedCatalog,
        breed_id: &str,
    ) -> Result<u64, CoreError> {
        let price = catalog
            .price_of(breed_id)
            .ok_or_else(|| CoreError::UnknownBreed(breed_id.to_string()))?;

        if inventory.owns(breed_id) {
            return Err(CoreError::AlreadyOwned(breed_id.to_string()));
        }

        self.progression_service.spend_coins(player, price)?;
        inventory.owned.insert(breed_id.to_string());
        inventory.current = breed_id.to_string();
        debug!(breed = breed_id, price, coins_left = player.coins, "breed purchased");
        Ok(price)
    }

    /// Equip an owned breed.
    pub fn select(&self, inventory: &mut InventoryState, breed_id: &str) -> Result<(), CoreError> {
        if !inventory.owns(breed_id) {
            return Err(CoreError::NotOwned(breed_id.to_string()));
        }
        inventory.current = breed_id.to_string();
        Ok(())
    }
}

impl Default for ShopService {
    fn default() -> Self {
        Self::new()
    }
}
