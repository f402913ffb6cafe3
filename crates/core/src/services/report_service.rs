use std::collections::BTreeSet;
use std::f64::consts::TAU;

use crate::models::expense::ExpenseRecord;
use crate::models::month::YearMonth;
use crate::models::report::{MonthlyBreakdown, PieSlice};
use crate::services::ledger_service::LedgerService;

/// Builds chart-ready aggregates from the ledger.
///
/// The core computes all the numbers; the frontend only draws them.
pub struct ReportService {
    ledger_service: LedgerService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            ledger_service: LedgerService::new(),
        }
    }

    /// Category totals and grand total for `month`.
    pub fn monthly_breakdown(&self, expenses: &[ExpenseRecord], month: YearMonth) -> MonthlyBreakdown {
        self.ledger_service.by_month(expenses, month)
    }

    /// One slice per category present in the breakdown, laid out clockwise
    /// in category order. Each sweep is `amount / total` of a full turn.
    /// Slices whose share is below `label_threshold` get `show_label = false`.
    ///
    /// An empty month yields no slices.
    pub fn pie_slices(&self, breakdown: &MonthlyBreakdown, label_threshold: f64) -> Vec<PieSlice> {
        if breakdown.total <= 0.0 {
            return Vec::new();
        }

        let mut start_angle = 0.0;
        breakdown
            .by_category
            .iter()
            .map(|(category, amount)| {
                let fraction = amount / breakdown.total;
                let sweep_angle = fraction * TAU;
                let slice = PieSlice {
                    category: *category,
                    amount: *amount,
                    fraction,
                    start_angle,
                    sweep_angle,
                    show_label: fraction >= label_threshold,
                };
                start_angle += sweep_angle;
                slice
            })
            .collect()
    }

    /// Distinct months that have at least one expense, newest first.
    pub fn months_with_activity(&self, expenses: &[ExpenseRecord]) -> Vec<YearMonth> {
        let months: BTreeSet<YearMonth> = expenses.iter().map(|e| YearMonth::of(e.date)).collect();
        months.into_iter().rev().collect()
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
