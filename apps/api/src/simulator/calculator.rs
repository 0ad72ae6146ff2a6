//! Pure simulation arithmetic.
//!
//! Inputs are deliberately unchecked: zero or negative populations follow IEEE-754
//! division (±∞ or NaN) and unknown categories fall back to a multiplier of 1.0.

use crate::models::category::PolicyCategory;

/// Multiplier applied when the category is missing or not one of the known slugs.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

pub fn efficiency_multiplier(policy_category: Option<&str>) -> f64 {
    match policy_category.and_then(PolicyCategory::from_slug) {
        Some(PolicyCategory::EconomicEquity) => 1.2,
        Some(PolicyCategory::PublicHealth) => 1.5,
        Some(PolicyCategory::DisasterPreparedness) => 0.9,
        None => DEFAULT_MULTIPLIER,
    }
}

/// `(budget / target_population) × multiplier(policy_category)`.
pub fn simulate(budget: f64, target_population: f64, policy_category: Option<&str>) -> f64 {
    (budget / target_population) * efficiency_multiplier(policy_category)
}
