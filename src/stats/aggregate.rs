// src/stats/aggregate.rs
//
// Statistics Aggregator: one pass over the full property collection.
// Malformed records degrade field by field: a bad price stays out of
// the average, a bad date stays out of the month/week tallies, but the
// record still counts everywhere else.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::property::PropertyRecord;

pub const TOP_LOCATIONS: usize = 10;
pub const WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Fixed INR price buckets, matching the dashboard's pie segments.
/// Each entry is (label, inclusive upper bound).
const PRICE_RANGES: &[(&str, f64)] = &[
    ("0-10L", 1_000_000.0),
    ("10L-25L", 2_500_000.0),
    ("25L-50L", 5_000_000.0),
    ("50L-1Cr", 10_000_000.0),
];
const PRICE_RANGE_TOP: &str = "1Cr+";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// "Jan 2024" style label of the record's UTC calendar month.
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    pub range: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub total_properties: i64,
    /// Owners with an id; ownerless records don't join the set.
    pub distinct_owner_count: i64,
    /// Mean of valid prices, rounded to the nearest whole unit; 0 when
    /// nothing had a valid price.
    pub average_price: i64,
    /// Records created within the week ending at `now`.
    pub listed_last_week: i64,
    /// Count-descending, ties in first-encountered order, top 10.
    pub top_locations: Vec<LocationCount>,
    /// Calendar order, oldest month first.
    pub monthly: Vec<MonthCount>,
    /// Valid-priced records bucketed into the fixed ranges, in range
    /// order. Buckets with zero hits are kept so charts stay aligned.
    pub price_ranges: Vec<PriceRangeCount>,
}

pub fn aggregate(properties: &[PropertyRecord], now: i64) -> PropertyStats {
    let mut total = 0i64;
    let mut price_sum = 0.0f64;
    let mut price_count = 0i64;
    let mut owners: HashSet<i64> = HashSet::new();
    let mut listed_last_week = 0i64;

    // Location counts keep first-insertion order so equal counts rank in
    // the order the pass first met them.
    let mut location_order: Vec<LocationCount> = Vec::new();
    let mut location_index: HashMap<String, usize> = HashMap::new();

    // Keyed by (year, month) so ordering is calendar, never lexical.
    let mut monthly: BTreeMap<(i32, u32), i64> = BTreeMap::new();

    let mut range_counts = vec![0i64; PRICE_RANGES.len() + 1];

    let week_ago = now - WEEK_SECS;

    for prop in properties {
        total += 1;

        if let Some(owner) = prop.owner_user_id {
            owners.insert(owner);
        }

        if let Some(price) = prop.valid_price() {
            price_sum += price;
            price_count += 1;
            range_counts[price_range_index(price)] += 1;
        }

        let location = prop.effective_location();
        match location_index.get(location) {
            Some(&i) => location_order[i].count += 1,
            None => {
                location_index.insert(location.to_string(), location_order.len());
                location_order.push(LocationCount {
                    location: location.to_string(),
                    count: 1,
                });
            }
        }

        if let Some(ts) = prop.created_at {
            if ts >= week_ago {
                listed_last_week += 1;
            }
            if let Some(key) = month_key(ts) {
                *monthly.entry(key).or_insert(0) += 1;
            }
        }
    }

    let average_price = if price_count > 0 {
        (price_sum / price_count as f64).round() as i64
    } else {
        0
    };

    // Stable sort: ties keep their first-encountered positions.
    location_order.sort_by(|a, b| b.count.cmp(&a.count));
    location_order.truncate(TOP_LOCATIONS);

    let monthly = monthly
        .into_iter()
        .map(|((year, month), count)| MonthCount {
            month: month_label(year, month),
            count,
        })
        .collect();

    let price_ranges = PRICE_RANGES
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(PRICE_RANGE_TOP))
        .zip(range_counts)
        .map(|(label, count)| PriceRangeCount {
            range: label.to_string(),
            count,
        })
        .collect();

    PropertyStats {
        total_properties: total,
        distinct_owner_count: owners.len() as i64,
        average_price,
        listed_last_week,
        top_locations: location_order,
        monthly,
        price_ranges,
    }
}

fn price_range_index(price: f64) -> usize {
    for (i, (_, upper)) in PRICE_RANGES.iter().enumerate() {
        if price <= *upper {
            return i;
        }
    }
    PRICE_RANGES.len()
}

/// (year, month) of the record's UTC calendar date. Out-of-range epochs
/// fall out of the monthly tally like missing dates do.
fn month_key(ts: i64) -> Option<(i32, u32)> {
    use chrono::Datelike;
    let dt = DateTime::from_timestamp(ts, 0)?;
    Some((dt.year(), dt.month()))
}

fn month_label(year: i32, month: u32) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let name = MONTHS[(month as usize).saturating_sub(1).min(11)];
    format!("{name} {year}")
}
