use crate::models::inventory::{Breed, STARTER_BREED};
use crate::models::mood::Mood;

/// Source of purchasable breeds and their mood images.
///
/// Two implementations exist: the built-in [`StaticCatalog`] and the
/// [`ManifestCatalog`] discovered from an external manifest. One of them is
/// chosen at startup and never changes afterwards.
///
/// [`StaticCatalog`]: super::static_catalog::StaticCatalog
/// [`ManifestCatalog`]: super::manifest::ManifestCatalog
pub trait BreedCatalog {
    /// Human-readable name of this catalog source (for logs).
    fn name(&self) -> &str;

    /// All breeds, in ascending price order, starter first.
    fn breeds(&self) -> &[Breed];

    fn get(&self, breed_id: &str) -> Option<&Breed> {
        self.breeds().iter().find(|b| b.id == breed_id)
    }

    fn price_of(&self, breed_id: &str) -> Option<u64> {
        self.get(breed_id).map(|b| b.price)
    }

    fn contains(&self, breed_id: &str) -> bool {
        self.get(breed_id).is_some()
    }

    /// Image for `breed_id` in `mood`, falling back to the starter's image
    /// for the same mood when the breed has none.
    fn image_for(&self, breed_id: &str, mood: Mood) -> Option<&str> {
        self.get(breed_id)
            .and_then(|b| b.images.get(&mood))
            .or_else(|| self.get(STARTER_BREED).and_then(|b| b.images.get(&mood)))
            .map(String::as_str)
    }
}
