pub mod catalog;
pub mod clock;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use catalog::static_catalog::StaticCatalog;
use catalog::traits::BreedCatalog;
use clock::{Clock, SystemClock};
use errors::CoreError;
use models::{
    expense::{Category, ExpenseId, ExpenseRecord},
    inventory::{Breed, InventoryState},
    month::YearMonth,
    mood::Mood,
    notice::{Notice, NoticeBoard, NoticeChannel, NoticeId},
    player::PlayerState,
    report::{MonthlyBreakdown, Overview, PieSlice},
    settings::GameConfig,
    state::AppState,
};
use services::{
    ledger_service::LedgerService,
    mood_service,
    progression_service::{ProgressOutcome, ProgressionService},
    report_service::ReportService,
    shop_service::ShopService,
};
use storage::{format, kv::KeyValueStore, manager::StorageManager};

/// Text of the level-up banner. Several level-ups from one expense share one banner.
const LEVEL_UP_TEXT: &str = "Your cat leveled up!";

/// Result of recording an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedExpense {
    pub record: ExpenseRecord,
    pub progress: ProgressOutcome,
    /// Mood after the expense was counted.
    pub mood: Mood,
    /// Banner to show, present when at least one level was gained.
    pub level_up_notice: Option<Notice>,
    /// The cat's reaction in the speech bubble.
    pub dialogue: Notice,
}

/// Main entry point for the Cat Island core library.
///
/// Owns the application state together with the store it is persisted to,
/// the clock, and the breed catalog chosen at startup. Every mutation is
/// written through to the store before the call returns.
#[must_use]
pub struct CatIsland {
    state: AppState,
    config: GameConfig,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    catalog: Box<dyn BreedCatalog>,
    notices: NoticeBoard,
    ledger_service: LedgerService,
    progression_service: ProgressionService,
    shop_service: ShopService,
    report_service: ReportService,
}

impl std::fmt::Debug for CatIsland {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatIsland")
            .field("expenses", &self.state.expenses.len())
            .field("player", &self.state.player)
            .field("budget", &self.state.budget)
            .field("inventory", &self.state.inventory)
            .field("catalog", &self.catalog.name())
            .finish()
    }
}

/// Configures a [`CatIsland`] before its state is loaded.
#[must_use]
pub struct CatIslandBuilder {
    store: Box<dyn KeyValueStore>,
    clock: Option<Box<dyn Clock>>,
    catalog: Option<Box<dyn BreedCatalog>>,
    config: GameConfig,
}

impl CatIslandBuilder {
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn catalog(mut self, catalog: Box<dyn BreedCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and load persisted state (or defaults).
    pub fn open(self) -> Result<CatIsland, CoreError> {
        self.config.validate()?;
        let state = StorageManager::load_state(self.store.as_ref(), &self.config);
        let catalog = self
            .catalog
            .unwrap_or_else(|| Box::new(StaticCatalog::new()));
        info!(
            expenses = state.expenses.len(),
            level = state.player.level,
            catalog = catalog.name(),
            "cat island opened"
        );
        Ok(CatIsland {
            state,
            config: self.config,
            store: self.store,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            catalog,
            notices: NoticeBoard::new(),
            ledger_service: LedgerService::new(),
            progression_service: ProgressionService::new(),
            shop_service: ShopService::new(),
            report_service: ReportService::new(),
        })
    }
}

impl CatIsland {
    /// Start configuring an instance backed by `store`.
    pub fn builder(store: Box<dyn KeyValueStore>) -> CatIslandBuilder {
        CatIslandBuilder {
            store,
            clock: None,
            catalog: None,
            config: GameConfig::default(),
        }
    }

    /// Open with the system clock, built-in catalog and default rules.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, CoreError> {
        Self::builder(store).open()
    }

    /// Open against the page's `localStorage` (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn open_browser() -> Result<Self, CoreError> {
        let store = storage::kv::BrowserStorage::open()?;
        Self::open(Box::new(store))
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Record an expense, award experience and coins, and post notices.
    ///
    /// `date` defaults to today's local calendar day.
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: Category,
        note: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<AddedExpense, CoreError> {
        let record = self.ledger_service.add(
            &mut self.state.expenses,
            self.clock.as_ref(),
            amount,
            category,
            note,
            date,
        )?;
        self.persist_expenses();
        debug!(id = %record.id, amount, category = category.key(), "expense added");

        let progress = self.progression_service.on_expense_added(
            &mut self.state.player,
            record.has_note(),
            &self.config,
        );
        self.persist_player();

        let level_up_notice = progress.leveled_up().then(|| {
            info!(level = self.state.player.level, "cat leveled up");
            self.notices.post(
                NoticeChannel::LevelUp,
                LEVEL_UP_TEXT,
                self.config.notice_duration_ms,
            )
        });

        let mood = self.mood();
        let dialogue = self.notices.post(
            NoticeChannel::Dialogue,
            mood.dialogue(),
            self.config.notice_duration_ms,
        );

        Ok(AddedExpense {
            record,
            progress,
            mood,
            level_up_notice,
            dialogue,
        })
    }

    /// Delete an expense. Unknown ids are a no-op returning `None`.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let removed = self.ledger_service.remove(&mut self.state.expenses, id)?;
        self.persist_expenses();
        debug!(id = %id, "expense removed");
        Some(removed)
    }

    /// Edit amount, category and note. Unknown ids return `Ok(false)`.
    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        amount: f64,
        category: Category,
        note: Option<&str>,
    ) -> Result<bool, CoreError> {
        let updated = self
            .ledger_service
            .update(&mut self.state.expenses, id, amount, category, note)?;
        if updated {
            self.persist_expenses();
            debug!(id = %id, amount, "expense updated");
        }
        Ok(updated)
    }

    #[must_use]
    pub fn expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.ledger_service.get(&self.state.expenses, id)
    }

    /// All expenses, most recent first.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.state.expenses
    }

    #[must_use]
    pub fn expenses_on(&self, day: NaiveDate) -> Vec<&ExpenseRecord> {
        self.ledger_service.on_date(&self.state.expenses, day)
    }

    #[must_use]
    pub fn expenses_today(&self) -> Vec<&ExpenseRecord> {
        self.expenses_on(self.clock.today())
    }

    #[must_use]
    pub fn expenses_in_month(&self, month: YearMonth) -> Vec<&ExpenseRecord> {
        self.ledger_service.in_month(&self.state.expenses, month)
    }

    /// Expenses whose note contains `query` (case-insensitive).
    #[must_use]
    pub fn search_notes(&self, query: &str) -> Vec<&ExpenseRecord> {
        self.ledger_service.search(&self.state.expenses, query)
    }

    /// Sum over the expenses accepted by `predicate`.
    #[must_use]
    pub fn total_where<F>(&self, predicate: F) -> f64
    where
        F: Fn(&ExpenseRecord) -> bool,
    {
        self.ledger_service.total_where(&self.state.expenses, predicate)
    }

    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.ledger_service.total(&self.state.expenses)
    }

    #[must_use]
    pub fn today_spent(&self) -> f64 {
        self.ledger_service
            .total_on(&self.state.expenses, self.clock.today())
    }

    #[must_use]
    pub fn month_spent(&self, month: YearMonth) -> f64 {
        self.ledger_service.total_in_month(&self.state.expenses, month)
    }

    #[must_use]
    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(self.clock.today())
    }

    // ── Budget & Mood ───────────────────────────────────────────────

    #[must_use]
    pub fn budget(&self) -> f64 {
        self.state.budget
    }

    /// Change the budget. Must be a positive finite number.
    pub fn set_budget(&mut self, budget: f64) -> Result<(), CoreError> {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Budget must be a positive number (got {budget})"
            )));
        }
        self.state.budget = budget;
        if let Err(e) = StorageManager::save_budget(self.store.as_mut(), &self.config, budget) {
            warn!(error = %e, "failed to persist budget");
        }
        debug!(budget, "budget changed");
        Ok(())
    }

    /// Mood from all-time spending against the budget.
    #[must_use]
    pub fn mood(&self) -> Mood {
        mood_service::mood(self.total_spent(), self.state.budget)
    }

    /// Image of the equipped breed for the current mood.
    #[must_use]
    pub fn mood_image(&self) -> Option<&str> {
        self.catalog
            .image_for(&self.state.inventory.current, self.mood())
    }

    // ── Player ──────────────────────────────────────────────────────

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.state.player
    }

    // ── Shop ────────────────────────────────────────────────────────

    /// Buy and equip a breed. Returns the price paid.
    pub fn purchase_breed(&mut self, breed_id: &str) -> Result<u64, CoreError> {
        let price = self.shop_service.purchase(
            &mut self.state.player,
            &mut self.state.inventory,
            self.catalog.as_ref(),
            breed_id,
        )?;
        self.persist_player();
        self.persist_inventory();
        Ok(price)
    }

    /// Equip a breed the player already owns.
    pub fn select_breed(&mut self, breed_id: &str) -> Result<(), CoreError> {
        self.shop_service
            .select(&mut self.state.inventory, breed_id)?;
        self.persist_inventory();
        Ok(())
    }

    #[must_use]
    pub fn inventory(&self) -> &InventoryState {
        &self.state.inventory
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn BreedCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub fn breeds(&self) -> &[Breed] {
        self.catalog.breeds()
    }

    // ── Reporting ───────────────────────────────────────────────────

    #[must_use]
    pub fn monthly_breakdown(&self, month: YearMonth) -> MonthlyBreakdown {
        self.report_service
            .monthly_breakdown(&self.state.expenses, month)
    }

    /// Pie chart wedges for `month`.
    #[must_use]
    pub fn pie_slices(&self, month: YearMonth) -> Vec<PieSlice> {
        let breakdown = self.monthly_breakdown(month);
        self.report_service
            .pie_slices(&breakdown, self.config.label_threshold)
    }

    #[must_use]
    pub fn months_with_activity(&self) -> Vec<YearMonth> {
        self.report_service
            .months_with_activity(&self.state.expenses)
    }

    /// Everything the status panel shows.
    #[must_use]
    pub fn overview(&self) -> Overview {
        let overall_total = self.total_spent();
        let player = &self.state.player;
        Overview {
            today_total: self.today_spent(),
            month_total: self.month_spent(self.current_month()),
            overall_total,
            budget: self.state.budget,
            remaining_budget: self.state.budget - overall_total,
            mood: mood_service::mood(overall_total, self.state.budget),
            level: player.level,
            current_exp: player.current_exp,
            exp_to_next_level: player.exp_to_next_level,
            exp_progress_percent: player.exp_progress_percent(),
            coins: player.coins,
            current_breed: self.state.inventory.current.clone(),
            expense_count: self.state.expenses.len(),
        }
    }

    // ── Notices ─────────────────────────────────────────────────────

    #[must_use]
    pub fn current_notice(&self, channel: NoticeChannel) -> Option<&Notice> {
        self.notices.current(channel)
    }

    /// Called by the presentation timer. Clears only if `id` is still shown.
    pub fn dismiss_notice(&mut self, id: NoticeId) -> bool {
        self.notices.dismiss(id)
    }

    /// Put an arbitrary line in the cat's speech bubble.
    pub fn say(&mut self, text: impl Into<String>) -> Notice {
        self.notices.post(
            NoticeChannel::Dialogue,
            text,
            self.config.notice_duration_ms,
        )
    }

    // ── Data management ─────────────────────────────────────────────

    /// Remove every stored blob and reset all state to defaults.
    pub fn clear_data(&mut self) {
        if let Err(e) = StorageManager::clear(self.store.as_mut(), &self.config) {
            warn!(error = %e, "failed to clear some stored data");
        }
        self.state = AppState::new(&self.config);
        self.notices.clear();
        info!("all data cleared");
    }

    /// Serialize the full state into a portable backup snapshot.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, CoreError> {
        format::write_snapshot(&self.state)
    }

    /// Replace the full state with a backup snapshot and persist it.
    pub fn import_snapshot(&mut self, data: &[u8]) -> Result<(), CoreError> {
        let state = format::read_snapshot(data)?;
        self.replace_state(state)
    }

    /// Write a backup snapshot to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_snapshot_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        format::save_to_file(&self.state, path)
    }

    /// Restore from a backup snapshot on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_snapshot_from_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        let state = format::load_from_file(path)?;
        self.replace_state(state)
    }

    /// Export all expenses as a JSON array.
    pub fn export_expenses_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state.expenses)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize expenses to JSON: {e}")))
    }

    /// Export all expenses as CSV.
    /// Columns: id, date, category, amount, note, created_at
    #[must_use]
    pub fn export_expenses_to_csv(&self) -> String {
        let mut csv = String::from("id,date,category,amount,note,created_at\n");
        for record in &self.state.expenses {
            let note = record.note.as_deref().unwrap_or("");
            let needs_quotes = note.contains([',', '"', '\n', '\r']);
            let escaped_note = if needs_quotes {
                format!("\"{}\"", note.replace('"', "\"\""))
            } else {
                note.to_string()
            };
            csv.push_str(&format!(
                "{},{},{},{:.2},{},{}\n",
                record.id,
                record.date,
                record.category.key(),
                record.amount,
                escaped_note,
                record.created_at.to_rfc3339(),
            ));
        }
        csv
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Give back the store, e.g. to reopen it later.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    fn replace_state(&mut self, mut state: AppState) -> Result<(), CoreError> {
        if let Some(bad) = state
            .expenses
            .iter()
            .find(|e| !e.amount.is_finite() || e.amount <= 0.0)
        {
            return Err(CoreError::InvalidSnapshot(format!(
                "expense {} has invalid amount {}",
                bad.id, bad.amount
            )));
        }
        if !state.player.is_consistent() {
            return Err(CoreError::InvalidSnapshot("player state violates invariants".into()));
        }
        if !state.budget.is_finite() || state.budget <= 0.0 {
            return Err(CoreError::InvalidSnapshot(format!(
                "budget must be positive (got {})",
                state.budget
            )));
        }
        state.inventory.repair();

        StorageManager::save_state(self.store.as_mut(), &self.config, &state)?;
        self.state = state;
        self.notices.clear();
        info!(expenses = self.state.expenses.len(), "snapshot restored");
        Ok(())
    }

    fn persist_expenses(&mut self) {
        if let Err(e) =
            StorageManager::save_expenses(self.store.as_mut(), &self.config, &self.state.expenses)
        {
            warn!(error = %e, "failed to persist expenses");
        }
    }

    fn persist_player(&mut self) {
        if let Err(e) =
            StorageManager::save_player(self.store.as_mut(), &self.config, &self.state.player)
        {
            warn!(error = %e, "failed to persist player");
        }
    }

    fn persist_inventory(&mut self) {
        if let Err(e) =
            StorageManager::save_inventory(self.store.as_mut(), &self.config, &self.state.inventory)
        {
            warn!(error = %e, "failed to persist inventory");
        }
    }
}
