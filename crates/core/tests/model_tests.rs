// ═══════════════════════════════════════════════════════════════════
// Model Tests — Category, YearMonth, PlayerState, Mood, Inventory,
// GameConfig, NoticeBoard
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::BTreeSet;

use cat_island_core::errors::CoreError;
use cat_island_core::models::expense::{normalize_note, Category, ExpenseId, ExpenseRecord};
use cat_island_core::models::inventory::{InventoryState, STARTER_BREED};
use cat_island_core::models::month::YearMonth;
use cat_island_core::models::mood::Mood;
use cat_island_core::models::notice::{NoticeBoard, NoticeChannel};
use cat_island_core::models::player::PlayerState;
use cat_island_core::models::settings::GameConfig;
use cat_island_core::models::state::AppState;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Category ────────────────────────────────────────────────────────

mod category {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Food).unwrap(), "\"food\"");
        assert_eq!(
            serde_json::to_string(&Category::Entertainment).unwrap(),
            "\"entertainment\""
        );
    }

    #[test]
    fn key_matches_serialized_form() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Transport".parse::<Category>().unwrap(), Category::Transport);
        assert_eq!(" bills ".parse::<Category>().unwrap(), Category::Bills);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "rent".parse::<Category>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn display_is_title_case() {
        assert_eq!(Category::Shopping.to_string(), "Shopping");
    }
}

// ── ExpenseRecord ───────────────────────────────────────────────────

mod expense_record {
    use super::*;

    #[test]
    fn json_uses_camel_case() {
        let record = ExpenseRecord {
            id: ExpenseId(1_700_000_000_000),
            amount: 12.5,
            category: Category::Food,
            note: Some("ramen".into()),
            date: date(2026, 4, 1),
            created_at: "2026-03-31T16:30:00Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"id\":1700000000000"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"date\":\"2026-04-01\""));
    }

    #[test]
    fn missing_note_deserializes_as_none() {
        let json = r#"{"id":5,"amount":3.0,"category":"other","date":"2026-01-02","createdAt":"2026-01-02T10:00:00Z"}"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.note, None);
        assert!(!record.has_note());
    }

    #[test]
    fn normalize_note_trims_and_drops_blank() {
        assert_eq!(normalize_note(Some("  coffee ")), Some("coffee".into()));
        assert_eq!(normalize_note(Some("   ")), None);
        assert_eq!(normalize_note(None), None);
    }
}

// ── YearMonth ───────────────────────────────────────────────────────

mod year_month {
    use super::*;

    #[test]
    fn parse_and_display() {
        let m: YearMonth = "2026-04".parse().unwrap();
        assert_eq!(m.year(), 2026);
        assert_eq!(m.month(), 4);
        assert_eq!(m.to_string(), "2026-04");
    }

    #[test]
    fn rejects_bad_input() {
        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("2026-4".parse::<YearMonth>().is_err());
        assert!("202604".parse::<YearMonth>().is_err());
        assert!("abcd-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn contains_only_its_days() {
        let m = YearMonth::new(2026, 2).unwrap();
        assert!(m.contains(date(2026, 2, 1)));
        assert!(m.contains(date(2026, 2, 28)));
        assert!(!m.contains(date(2026, 3, 1)));
        assert!(!m.contains(date(2025, 2, 10)));
    }

    #[test]
    fn of_date() {
        assert_eq!(YearMonth::of(date(2026, 10, 18)), YearMonth::new(2026, 10).unwrap());
    }

    #[test]
    fn orders_chronologically() {
        let a = YearMonth::new(2025, 12).unwrap();
        let b = YearMonth::new(2026, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_as_string() {
        let m = YearMonth::new(2026, 7).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2026-07\"");
        let back: YearMonth = serde_json::from_str("\"2026-07\"").unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<YearMonth>("\"2026-00\"").is_err());
    }
}

// ── PlayerState ─────────────────────────────────────────────────────

mod player_state {
    use super::*;

    #[test]
    fn default_values() {
        let p = PlayerState::default();
        assert_eq!(p.level, 1);
        assert_eq!(p.current_exp, 0);
        assert_eq!(p.exp_to_next_level, 100);
        assert_eq!(p.coins, 0);
        assert!(p.is_consistent());
    }

    #[test]
    fn json_field_names_match_browser_blob() {
        let json = r#"{"level":3,"currentExp":12,"expToNextLevel":225,"coins":40}"#;
        let p: PlayerState = serde_json::from_str(json).unwrap();
        assert_eq!(p.level, 3);
        assert_eq!(p.current_exp, 12);
        assert_eq!(p.exp_to_next_level, 225);
        assert_eq!(p.coins, 40);
    }

    #[test]
    fn inconsistent_when_exp_reaches_threshold() {
        let p = PlayerState {
            level: 2,
            current_exp: 150,
            exp_to_next_level: 150,
            coins: 0,
        };
        assert!(!p.is_consistent());
    }

    #[test]
    fn inconsistent_with_level_zero() {
        let p = PlayerState {
            level: 0,
            ..PlayerState::default()
        };
        assert!(!p.is_consistent());
    }

    #[test]
    fn exp_progress_percent_rounds() {
        let mut p = PlayerState::default();
        p.current_exp = 33;
        assert_eq!(p.exp_progress_percent(), 33);
        p.exp_to_next_level = 150;
        p.current_exp = 100;
        assert_eq!(p.exp_progress_percent(), 67);
    }

    #[test]
    fn custom_config_threshold() {
        let config = GameConfig {
            initial_exp_to_next_level: 20,
            ..GameConfig::default()
        };
        assert_eq!(PlayerState::new(&config).exp_to_next_level, 20);
    }
}

// ── Mood ────────────────────────────────────────────────────────────

mod mood {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_key(mood.key()), Some(mood));
        }
        assert_eq!(Mood::from_key("sleepy"), None);
    }

    #[test]
    fn ordered_by_stress() {
        assert!(Mood::Happy < Mood::Relaxed);
        assert!(Mood::Sad < Mood::Angry);
    }

    #[test]
    fn label_and_dialogue_present() {
        for mood in Mood::ALL {
            assert!(!mood.label().is_empty());
            assert!(!mood.dialogue().is_empty());
        }
        assert_eq!(Mood::Surprised.to_string(), "Surprised");
    }
}

// ── InventoryState ──────────────────────────────────────────────────

mod inventory {
    use super::*;

    #[test]
    fn default_owns_starter() {
        let inv = InventoryState::default();
        assert!(inv.owns(STARTER_BREED));
        assert_eq!(inv.current, STARTER_BREED);
        assert_eq!(inv.owned.len(), 1);
    }

    #[test]
    fn repair_adds_missing_starter() {
        let mut inv = InventoryState {
            owned: BTreeSet::from(["black".to_string()]),
            current: "black".into(),
        };
        assert!(inv.repair());
        assert!(inv.owns(STARTER_BREED));
        assert_eq!(inv.current, "black");
    }

    #[test]
    fn repair_resets_dangling_current() {
        let mut inv = InventoryState {
            owned: BTreeSet::from([STARTER_BREED.to_string()]),
            current: "siamese".into(),
        };
        assert!(inv.repair());
        assert_eq!(inv.current, STARTER_BREED);
    }

    #[test]
    fn repair_noop_when_valid() {
        let mut inv = InventoryState::default();
        assert!(!inv.repair());
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&InventoryState::default()).unwrap();
        assert_eq!(json, r#"{"owned":["orange"],"current":"orange"}"#);
    }
}

// ── GameConfig ──────────────────────────────────────────────────────

mod game_config {
    use super::*;

    #[test]
    fn defaults() {
        let c = GameConfig::default();
        assert_eq!(c.base_exp, 5);
        assert_eq!(c.note_bonus, 2);
        assert_eq!(c.initial_exp_to_next_level, 100);
        assert_eq!(c.level_growth, 1.5);
        assert_eq!(c.default_budget, 1000.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn storage_keys() {
        let c = GameConfig::default();
        assert_eq!(c.expenses_key(), "cat_island_expenses");
        assert_eq!(c.player_key(), "cat_island_player");
        assert_eq!(c.budget_key(), "cat_island_budget");
        assert_eq!(c.inventory_key(), "cat_island_inventory");
    }

    #[test]
    fn rejects_shrinking_growth() {
        let c = GameConfig {
            level_growth: 0.5,
            ..GameConfig::default()
        };
        assert!(matches!(c.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn rejects_zero_threshold_and_bad_budget() {
        let c = GameConfig {
            initial_exp_to_next_level: 0,
            ..GameConfig::default()
        };
        assert!(c.validate().is_err());
        let c = GameConfig {
            default_budget: -1.0,
            ..GameConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{"base_exp": 10}"#).unwrap();
        assert_eq!(c.base_exp, 10);
        assert_eq!(c.note_bonus, 2);
    }
}

// ── AppState ────────────────────────────────────────────────────────

mod app_state {
    use super::*;

    #[test]
    fn default_budget_from_config() {
        let config = GameConfig {
            default_budget: 500.0,
            ..GameConfig::default()
        };
        let state = AppState::new(&config);
        assert_eq!(state.budget, 500.0);
        assert!(state.expenses.is_empty());
        assert_eq!(state.player, PlayerState::default());
    }
}

// ── NoticeBoard ─────────────────────────────────────────────────────

mod notice_board {
    use super::*;

    #[test]
    fn post_then_dismiss() {
        let mut board = NoticeBoard::new();
        let notice = board.post(NoticeChannel::LevelUp, "level up", 2500);
        assert_eq!(board.current(NoticeChannel::LevelUp).unwrap().text, "level up");
        assert!(board.dismiss(notice.id));
        assert!(board.current(NoticeChannel::LevelUp).is_none());
    }

    #[test]
    fn stale_timer_does_not_clear_newer_message() {
        let mut board = NoticeBoard::new();
        let first = board.post(NoticeChannel::Dialogue, "first", 2500);
        let second = board.post(NoticeChannel::Dialogue, "second", 2500);

        assert!(!board.dismiss(first.id));
        assert_eq!(board.current(NoticeChannel::Dialogue).unwrap().id, second.id);

        assert!(board.dismiss(second.id));
        assert!(board.current(NoticeChannel::Dialogue).is_none());
    }

    #[test]
    fn identical_text_still_distinguished() {
        let mut board = NoticeBoard::new();
        let first = board.post(NoticeChannel::LevelUp, "same", 2500);
        let second = board.post(NoticeChannel::LevelUp, "same", 2500);
        assert_ne!(first.id, second.id);
        assert!(!board.dismiss(first.id));
        assert!(board.current(NoticeChannel::LevelUp).is_some());
    }

    #[test]
    fn channels_are_independent() {
        let mut board = NoticeBoard::new();
        let banner = board.post(NoticeChannel::LevelUp, "up", 2500);
        board.post(NoticeChannel::Dialogue, "meow", 2500);
        assert!(board.dismiss(banner.id));
        assert_eq!(board.current(NoticeChannel::Dialogue).unwrap().text, "meow");
    }
}
