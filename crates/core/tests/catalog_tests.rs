// ═══════════════════════════════════════════════════════════════════
// Catalog Tests — StaticCatalog, ManifestCatalog, catalog selection
// ═══════════════════════════════════════════════════════════════════

use cat_island_core::catalog::manifest::ManifestCatalog;
use cat_island_core::catalog::selector::{discover_catalog, select_catalog};
use cat_island_core::catalog::static_catalog::StaticCatalog;
use cat_island_core::catalog::traits::BreedCatalog;
use cat_island_core::errors::CoreError;
use cat_island_core::models::inventory::STARTER_BREED;
use cat_island_core::models::mood::Mood;
use cat_island_core::models::settings::GameConfig;

const MANIFEST: &str = r#"{
  "breeds": [
    { "id": "tuxedo", "name": "Tuxedo",
      "images": { "happy": "cdn/tuxedo/happy.png", "angry": "cdn/tuxedo/angry.png" } },
    { "id": "orange", "name": "Ginger",
      "images": { "happy": "cdn/orange/happy.png", "sad": "cdn/orange/sad.png" } },
    { "id": "sphynx",
      "images": { "happy": "cdn/sphynx/happy.png", "sleepy": "cdn/sphynx/zzz.png" } },
    { "id": "tuxedo", "images": {} }
  ]
}"#;

// ── StaticCatalog ───────────────────────────────────────────────────

mod static_catalog {
    use super::*;

    #[test]
    fn starter_is_first_and_free() {
        let catalog = StaticCatalog::new();
        let first = &catalog.breeds()[0];
        assert_eq!(first.id, STARTER_BREED);
        assert!(first.is_free());
    }

    #[test]
    fn prices_ascend() {
        let catalog = StaticCatalog::new();
        let prices: Vec<u64> = catalog.breeds().iter().map(|b| b.price).collect();
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(catalog.price_of("black"), Some(25));
    }

    #[test]
    fn every_breed_has_every_mood_image() {
        let catalog = StaticCatalog::new();
        for breed in catalog.breeds() {
            for mood in Mood::ALL {
                assert!(breed.images.contains_key(&mood), "{} lacks {:?}", breed.id, mood);
            }
        }
        assert_eq!(
            catalog.image_for("calico", Mood::Sad),
            Some("images/cats/calico/sad.png")
        );
    }

    #[test]
    fn unknown_breed() {
        let catalog = StaticCatalog::new();
        assert!(!catalog.contains("dragon"));
        assert_eq!(catalog.price_of("dragon"), None);
        assert_eq!(catalog.name(), "built-in");
    }
}

// ── ManifestCatalog ─────────────────────────────────────────────────

mod manifest_catalog {
    use super::*;

    #[test]
    fn prices_follow_discovery_order() {
        let catalog = ManifestCatalog::from_json(MANIFEST, &GameConfig::default()).unwrap();
        let ids: Vec<&str> = catalog.breeds().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["orange", "tuxedo", "sphynx"]);
        assert_eq!(catalog.price_of("orange"), Some(0));
        assert_eq!(catalog.price_of("tuxedo"), Some(25));
        assert_eq!(catalog.price_of("sphynx"), Some(50));
    }

    #[test]
    fn price_step_from_config() {
        let config = GameConfig {
            manifest_price_step: 40,
            ..GameConfig::default()
        };
        let catalog = ManifestCatalog::from_json(MANIFEST, &config).unwrap();
        assert_eq!(catalog.price_of("sphynx"), Some(80));
    }

    #[test]
    fn name_defaults_to_id() {
        let catalog = ManifestCatalog::from_json(MANIFEST, &GameConfig::default()).unwrap();
        assert_eq!(catalog.get("sphynx").unwrap().name, "sphynx");
        assert_eq!(catalog.get("orange").unwrap().name, "Ginger");
    }

    #[test]
    fn unknown_mood_keys_ignored() {
        let catalog = ManifestCatalog::from_json(MANIFEST, &GameConfig::default()).unwrap();
        assert_eq!(catalog.get("sphynx").unwrap().images.len(), 1);
    }

    #[test]
    fn image_falls_back_to_starter() {
        let catalog = ManifestCatalog::from_json(MANIFEST, &GameConfig::default()).unwrap();
        assert_eq!(
            catalog.image_for("tuxedo", Mood::Angry),
            Some("cdn/tuxedo/angry.png")
        );
        assert_eq!(catalog.image_for("tuxedo", Mood::Sad), Some("cdn/orange/sad.png"));
        assert_eq!(catalog.image_for("tuxedo", Mood::Confused), None);
    }

    #[test]
    fn starter_added_when_missing() {
        let json = r#"{"breeds":[{"id":"black"},{"id":"white"}]}"#;
        let catalog = ManifestCatalog::from_json(json, &GameConfig::default()).unwrap();
        assert_eq!(catalog.breeds()[0].id, STARTER_BREED);
        assert_eq!(catalog.price_of(STARTER_BREED), Some(0));
        assert_eq!(catalog.price_of("black"), Some(25));
        assert_eq!(catalog.price_of("white"), Some(50));
        assert!(catalog.image_for("black", Mood::Happy).is_some());
    }

    #[test]
    fn empty_manifest_rejected() {
        let err = ManifestCatalog::from_json(r#"{"breeds":[]}"#, &GameConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest(_)));
    }

    #[test]
    fn malformed_manifest_rejected() {
        let err = ManifestCatalog::from_json("<html>", &GameConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest(_)));
    }
}

// ── Selection ───────────────────────────────────────────────────────

mod selection {
    use super::*;

    #[test]
    fn no_manifest_uses_built_in() {
        let catalog = select_catalog(None, &GameConfig::default());
        assert_eq!(catalog.name(), "built-in");
    }

    #[test]
    fn valid_manifest_used() {
        let catalog = select_catalog(Some(MANIFEST), &GameConfig::default());
        assert_eq!(catalog.name(), "manifest");
        assert!(catalog.contains("sphynx"));
    }

    #[test]
    fn broken_manifest_falls_back() {
        let catalog = select_catalog(Some("{\"breeds\": 12}"), &GameConfig::default());
        assert_eq!(catalog.name(), "built-in");
        assert!(catalog.contains("siamese"));
    }

    #[tokio::test]
    async fn unreachable_manifest_falls_back() {
        // Port 9 (discard) is closed on test machines; the connection is refused.
        let catalog = discover_catalog("http://127.0.0.1:9/breeds.json", &GameConfig::default()).await;
        assert_eq!(catalog.name(), "built-in");
    }

    #[tokio::test]
    async fn fetch_error_is_network_error() {
        let err = ManifestCatalog::fetch("http://127.0.0.1:9/breeds.json", &GameConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
