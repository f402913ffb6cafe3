use std::collections::BTreeMap;

use crate::models::inventory::{Breed, STARTER_BREED};
use crate::models::mood::Mood;

use super::traits::BreedCatalog;

/// (id, display name, price)
const BUILT_IN: [(&str, &str, u64); 5] = [
    (STARTER_BREED, "Orange Tabby", 0),
    ("black", "Black Cat", 25),
    ("white", "White Cat", 50),
    ("calico", "Calico", 75),
    ("siamese", "Siamese", 100),
];

/// Fixed breed table compiled into the library. Used whenever no manifest is available.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    breeds: Vec<Breed>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        let breeds = BUILT_IN
            .iter()
            .map(|(id, name, price)| Breed {
                id: (*id).to_string(),
                name: (*name).to_string(),
                price: *price,
                images: default_images(id),
            })
            .collect();
        Self { breeds }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BreedCatalog for StaticCatalog {
    fn name(&self) -> &str {
        "built-in"
    }

    fn breeds(&self) -> &[Breed] {
        &self.breeds
    }
}

/// Conventional asset layout: `images/cats/<breed>/<mood>.png`.
pub(crate) fn default_images(breed_id: &str) -> BTreeMap<Mood, String> {
    Mood::ALL
        .iter()
        .map(|mood| (*mood, format!("images/cats/{breed_id}/{}.png", mood.key())))
        .collect()
}
