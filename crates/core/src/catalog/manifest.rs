use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::inventory::{Breed, STARTER_BREED};
use crate::models::mood::Mood;
use crate::models::settings::GameConfig;

use super::static_catalog::{default_images, StaticCatalog};
use super::traits::BreedCatalog;

// ── Manifest document ───────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestDocument {
    breeds: Vec<ManifestBreed>,
}

#[derive(Deserialize)]
struct ManifestBreed {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    images: BTreeMap<String, String>,
}

/// Catalog discovered from an external JSON manifest:
///
/// ```json
/// { "breeds": [ { "id": "black", "name": "Black Cat",
///                 "images": { "happy": "img/black/happy.png" } } ] }
/// ```
///
/// Prices are not part of the manifest. The starter breed is free and every
/// other breed costs `manifest_price_step` more than the one discovered
/// before it.
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    breeds: Vec<Breed>,
}

impl ManifestCatalog {
    /// Parse manifest text.
    pub fn from_json(json: &str, config: &GameConfig) -> Result<Self, CoreError> {
        let doc: ManifestDocument = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidManifest(format!("Failed to parse manifest: {e}")))?;

        let mut seen = HashSet::new();
        let mut starter: Option<Breed> = None;
        let mut others = Vec::new();

        for entry in doc.breeds {
            let id = entry.id.trim().to_string();
            if id.is_empty() {
                warn!("manifest breed without id skipped");
                continue;
            }
            if !seen.insert(id.clone()) {
                warn!(breed = %id, "duplicate manifest breed skipped");
                continue;
            }

            let mut images = BTreeMap::new();
            for (key, asset) in entry.images {
                match Mood::from_key(&key) {
                    Some(mood) => {
                        images.insert(mood, asset);
                    }
                    None => debug!(breed = %id, mood = %key, "unknown mood key ignored"),
                }
            }

            let breed = Breed {
                name: entry.name.unwrap_or_else(|| id.clone()),
                id,
                price: 0,
                images,
            };
            if breed.id == STARTER_BREED {
                starter = Some(breed);
            } else {
                others.push(breed);
            }
        }

        if starter.is_none() && others.is_empty() {
            return Err(CoreError::InvalidManifest("Manifest lists no breeds".into()));
        }

        // The starter is always available, even if the manifest forgot it.
        let starter = starter.unwrap_or_else(|| {
            StaticCatalog::new()
                .get(STARTER_BREED)
                .cloned()
                .unwrap_or_else(|| Breed {
                    id: STARTER_BREED.to_string(),
                    name: STARTER_BREED.to_string(),
                    price: 0,
                    images: default_images(STARTER_BREED),
                })
        });

        let mut breeds = Vec::with_capacity(others.len() + 1);
        breeds.push(Breed { price: 0, ..starter });
        for (index, breed) in others.into_iter().enumerate() {
            let price = config.manifest_price_step * (index as u64 + 1);
            breeds.push(Breed { price, ..breed });
        }

        Ok(Self { breeds })
    }

    /// Download and parse a manifest.
    pub async fn fetch(url: &str, config: &GameConfig) -> Result<Self, CoreError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(10));
        let client = builder.build().unwrap_or_else(|_| Client::new());

        let body = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::from_json(&body, config)
    }
}

impl BreedCatalog for ManifestCatalog {
    fn name(&self) -> &str {
        "manifest"
    }

    fn breeds(&self) -> &[Breed] {
        &self.breeds
    }
}
