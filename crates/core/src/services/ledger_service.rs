use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

use crate::clock::Clock;
use crate::errors::CoreError;
use crate::models::expense::{normalize_note, Category, ExpenseId, ExpenseRecord};
use crate::models::month::YearMonth;
use crate::models::report::MonthlyBreakdown;

/// Adds, edits, removes and sums expense records.
///
/// Pure business logic over a most-recent-first `Vec`; persistence is the
/// caller's job. Easy to test.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Record a new expense at the front of the ledger.
    ///
    /// `date` defaults to the clock's local calendar day.
    pub fn add(
        &self,
        expenses: &mut Vec<ExpenseRecord>,
        clock: &dyn Clock,
        amount: f64,
        category: Category,
        note: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<ExpenseRecord, CoreError> {
        validate_amount(amount)?;

        let now = clock.now();
        let record = ExpenseRecord {
            id: self.next_id(expenses, clock.timestamp_millis()),
            amount,
            category,
            note: normalize_note(note),
            date: date.unwrap_or_else(|| clock.today()),
            created_at: now.with_timezone(&Utc),
        };
        expenses.insert(0, record.clone());
        Ok(record)
    }

    /// Remove a record. Unknown ids are ignored and return `None`.
    pub fn remove(&self, expenses: &mut Vec<ExpenseRecord>, id: ExpenseId) -> Option<ExpenseRecord> {
        let idx = expenses.iter().position(|e| e.id == id)?;
        Some(expenses.remove(idx))
    }

    /// Edit amount, category and note in place. Id, date and creation time
    /// are kept. Returns `Ok(false)` when the id is unknown.
    pub fn update(
        &self,
        expenses: &mut [ExpenseRecord],
        id: ExpenseId,
        amount: f64,
        category: Category,
        note: Option<&str>,
    ) -> Result<bool, CoreError> {
        validate_amount(amount)?;

        let Some(record) = expenses.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        record.amount = amount;
        record.category = category;
        record.note = normalize_note(note);
        Ok(true)
    }

    pub fn get<'a>(&self, expenses: &'a [ExpenseRecord], id: ExpenseId) -> Option<&'a ExpenseRecord> {
        expenses.iter().find(|e| e.id == id)
    }

    /// Sum of amounts over the records accepted by `predicate`.
    pub fn total_where<F>(&self, expenses: &[ExpenseRecord], predicate: F) -> f64
    where
        F: Fn(&ExpenseRecord) -> bool,
    {
        expenses
            .iter()
            .filter(|e| predicate(*e))
            .map(|e| e.amount)
            .sum()
    }

    pub fn total(&self, expenses: &[ExpenseRecord]) -> f64 {
        self.total_where(expenses, |_| true)
    }

    pub fn total_on(&self, expenses: &[ExpenseRecord], day: NaiveDate) -> f64 {
        self.total_where(expenses, |e| e.date == day)
    }

    pub fn total_in_month(&self, expenses: &[ExpenseRecord], month: YearMonth) -> f64 {
        self.total_where(expenses, |e| month.contains(e.date))
    }

    /// Records dated `day`, in ledger order.
    pub fn on_date<'a>(&self, expenses: &'a [ExpenseRecord], day: NaiveDate) -> Vec<&'a ExpenseRecord> {
        expenses.iter().filter(|e| e.date == day).collect()
    }

    /// Records within `month`, in ledger order.
    pub fn in_month<'a>(&self, expenses: &'a [ExpenseRecord], month: YearMonth) -> Vec<&'a ExpenseRecord> {
        expenses.iter().filter(|e| month.contains(e.date)).collect()
    }

    /// Case-insensitive substring search over notes.
    pub fn search<'a>(&self, expenses: &'a [ExpenseRecord], query: &str) -> Vec<&'a ExpenseRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        expenses
            .iter()
            .filter(|e| {
                e.note
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Per-category sums and grand total for one month.
    pub fn by_month(&self, expenses: &[ExpenseRecord], month: YearMonth) -> MonthlyBreakdown {
        let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();
        for record in expenses.iter().filter(|e| month.contains(e.date)) {
            *by_category.entry(record.category).or_insert(0.0) += record.amount;
        }
        let total = by_category.values().sum();
        MonthlyBreakdown {
            month,
            by_category,
            total,
        }
    }

    /// Millisecond timestamp, bumped past every existing id.
    fn next_id(&self, expenses: &[ExpenseRecord], now_millis: i64) -> ExpenseId {
        let candidate = now_millis.max(0) as u64;
        let highest = expenses.iter().map(|e| e.id.0).max();
        match highest {
            Some(highest) if highest >= candidate => ExpenseId(highest + 1),
            _ => ExpenseId(candidate),
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Amounts must be finite and strictly positive.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Amount must be a positive number (got {amount})"
        )));
    }
    Ok(())
}
