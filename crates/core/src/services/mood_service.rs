use crate::models::mood::Mood;

/// Upper bound (inclusive) of each mood bucket, least stressed first.
/// Anything above the last bound is `Angry`.
const MOOD_THRESHOLDS: [(f64, Mood); 5] = [
    (0.20, Mood::Happy),
    (0.40, Mood::Relaxed),
    (0.60, Mood::Confused),
    (0.80, Mood::Surprised),
    (1.00, Mood::Sad),
];

/// Spend-to-budget ratio; 0 when the budget is not a positive number.
pub fn spend_ratio(total: f64, budget: f64) -> f64 {
    if !budget.is_finite() || budget <= 0.0 {
        return 0.0;
    }
    total / budget
}

/// Bucket a ratio. Bounds are inclusive: exactly 0.40 is still `Relaxed`.
pub fn classify_ratio(ratio: f64) -> Mood {
    MOOD_THRESHOLDS
        .iter()
        .find(|(upper, _)| ratio <= *upper)
        .map(|(_, mood)| *mood)
        .unwrap_or(Mood::Angry)
}

/// The cat's mood for the given total spend and budget.
pub fn mood(total: f64, budget: f64) -> Mood {
    classify_ratio(spend_ratio(total, budget))
}
