use tracing::{info, warn};

use crate::models::settings::GameConfig;

use super::manifest::ManifestCatalog;
use super::static_catalog::StaticCatalog;
use super::traits::BreedCatalog;

/// Pick the catalog for this session from optional manifest text.
///
/// A missing or unusable manifest falls back to the built-in table.
pub fn select_catalog(manifest: Option<&str>, config: &GameConfig) -> Box<dyn BreedCatalog> {
    let Some(json) = manifest else {
        info!("no breed manifest supplied, using built-in catalog");
        return Box::new(StaticCatalog::new());
    };
    match ManifestCatalog::from_json(json, config) {
        Ok(catalog) => {
            info!(breeds = catalog.breeds().len(), "using breed manifest");
            Box::new(catalog)
        }
        Err(e) => {
            warn!(error = %e, "breed manifest rejected, using built-in catalog");
            Box::new(StaticCatalog::new())
        }
    }
}

/// Fetch the manifest at `url` and pick the catalog, falling back to the
/// built-in table on any network or parse failure.
pub async fn discover_catalog(url: &str, config: &GameConfig) -> Box<dyn BreedCatalog> {
    match ManifestCatalog::fetch(url, config).await {
        Ok(catalog) => {
            info!(url, breeds = catalog.breeds().len(), "using fetched breed manifest");
            Box::new(catalog)
        }
        Err(e) => {
            warn!(url, error = %e, "breed manifest unavailable, using built-in catalog");
            Box::new(StaticCatalog::new())
        }
    }
}
