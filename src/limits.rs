/// Longest inclusive range a bulk edit may enumerate (about five years).
pub const MAX_RANGE_DAYS: i64 = 5 * 366;

/// Max dates in an explicit bulk selection.
pub const MAX_SELECTED_DATES: usize = 2_000;

/// Share of total rooms at or below which a day counts as high demand.
pub const HIGH_DEMAND_REMAINING_RATIO: f64 = 0.2;

/// Occupancy percent thresholds for calendar tiers.
pub const TIER_FULL_PCT: f64 = 90.0;
pub const TIER_HIGH_PCT: f64 = 70.0;
pub const TIER_MEDIUM_PCT: f64 = 50.0;
