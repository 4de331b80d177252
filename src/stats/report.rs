// src/stats/report.rs
//
// AggregateReport: the snapshot both pipelines derive. Always recomputed
// from scratch, never incrementally updated, so two runs over the same
// data agree on everything but `generated_at`.

use serde::{Deserialize, Serialize};

use crate::domain::property::PropertyRecord;
use crate::domain::user::UserRecord;
use crate::stats::aggregate::{aggregate, LocationCount, MonthCount, PriceRangeCount};
use crate::stats::rankings::{owner_leaderboard, recent_properties, OwnerActivity, RECENT_LIMIT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub property_count: i64,
    pub distinct_user_count: i64,
    pub properties_in_last_week: i64,
    pub average_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// When this snapshot was computed, unix seconds.
    pub generated_at: i64,
    pub totals: ReportTotals,
    pub top_locations: Vec<LocationCount>,
    pub monthly: Vec<MonthCount>,
    pub price_ranges: Vec<PriceRangeCount>,
    pub recent_properties: Vec<PropertyRecord>,
    pub user_leaderboard: Vec<OwnerActivity>,
}

/// Accessor output in, report out: aggregator then selector, no I/O.
pub fn build_report(
    properties: &[PropertyRecord],
    users: &[UserRecord],
    now: i64,
) -> AggregateReport {
    let stats = aggregate(properties, now);

    AggregateReport {
        generated_at: now,
        totals: ReportTotals {
            property_count: stats.total_properties,
            distinct_user_count: stats.distinct_owner_count,
            properties_in_last_week: stats.listed_last_week,
            average_price: stats.average_price,
        },
        top_locations: stats.top_locations,
        monthly: stats.monthly,
        price_ranges: stats.price_ranges,
        recent_properties: recent_properties(properties, RECENT_LIMIT),
        user_leaderboard: owner_leaderboard(properties, users),
    }
}
