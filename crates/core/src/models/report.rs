use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::expense::Category;
use super::month::YearMonth;
use super::mood::Mood;

/// Per-category totals for a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub month: YearMonth,

    /// Only categories with at least one record appear.
    pub by_category: BTreeMap<Category, f64>,

    /// Sum of all categories.
    pub total: f64,
}

impl MonthlyBreakdown {
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

/// One wedge of the monthly pie chart.
///
/// Angles are in radians, measured from the start of the circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: Category,
    pub amount: f64,
    /// Share of the month total, `0..=1`.
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    /// False for slices too thin to carry a readable label.
    pub show_label: bool,
}

/// Everything the status panel needs in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub today_total: f64,
    pub month_total: f64,
    pub overall_total: f64,
    pub budget: f64,
    /// Budget minus overall spending; negative when over budget.
    pub remaining_budget: f64,
    pub mood: Mood,
    pub level: u32,
    pub current_exp: u64,
    pub exp_to_next_level: u64,
    pub exp_progress_percent: u8,
    pub coins: u64,
    pub current_breed: String,
    pub expense_count: usize,
}
