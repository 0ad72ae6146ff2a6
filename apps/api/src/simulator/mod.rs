// Policy simulator: a budget-per-capita figure scaled by a per-category efficiency multiplier.

pub mod calculator;
pub mod handlers;
