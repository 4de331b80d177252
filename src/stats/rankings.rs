// src/stats/rankings.rs
//
// Recency/Ranking Selector: pure views over the already-fetched
// collection. Recency uses a stable sort so equal timestamps (and the
// whole undated tail) keep their incoming order.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::property::PropertyRecord;
use crate::domain::user::UserRecord;

pub const RECENT_LIMIT: usize = 10;

/// The `limit` most-recently-created records, newest first, undated
/// records after all dated ones.
pub fn recent_properties(properties: &[PropertyRecord], limit: usize) -> Vec<PropertyRecord> {
    let mut sorted: Vec<PropertyRecord> = properties.to_vec();
    sorted.sort_by(|a, b| compare_created_desc(a.created_at, b.created_at));
    sorted.truncate(limit);
    sorted
}

fn compare_created_desc(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One leaderboard row per distinct owner. Ownerless listings pool into
/// the "Unknown" bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerActivity {
    pub owner_user_id: Option<i64>,
    /// Resolved from the users collection when the owner exists;
    /// "Unknown" otherwise.
    pub email: String,
    pub listing_count: i64,
    /// Earliest listing the owner ever created, unix seconds.
    pub earliest_listing_at: Option<i64>,
}

/// Group by owner, count listings, keep the earliest creation time.
/// Ordering: listing count descending, then earliest listing ascending
/// so equal counts rank deterministically, then owner id as a final
/// stabilizer.
pub fn owner_leaderboard(
    properties: &[PropertyRecord],
    users: &[UserRecord],
) -> Vec<OwnerActivity> {
    let emails: HashMap<i64, &str> = users.iter().map(|u| (u.id, u.email.as_str())).collect();

    let mut groups: HashMap<Option<i64>, OwnerActivity> = HashMap::new();

    for prop in properties {
        let entry = groups
            .entry(prop.owner_user_id)
            .or_insert_with(|| OwnerActivity {
                owner_user_id: prop.owner_user_id,
                email: prop
                    .owner_user_id
                    .and_then(|id| emails.get(&id).map(|e| e.to_string()))
                    .unwrap_or_else(|| "Unknown".to_string()),
                listing_count: 0,
                earliest_listing_at: None,
            });

        entry.listing_count += 1;
        if let Some(ts) = prop.created_at {
            entry.earliest_listing_at = Some(match entry.earliest_listing_at {
                Some(prev) => prev.min(ts),
                None => ts,
            });
        }
    }

    let mut rows: Vec<OwnerActivity> = groups.into_values().collect();
    rows.sort_by(|a, b| {
        b.listing_count
            .cmp(&a.listing_count)
            .then_with(|| compare_earliest_asc(a.earliest_listing_at, b.earliest_listing_at))
            .then_with(|| a.owner_user_id.cmp(&b.owner_user_id))
    });
    rows
}

fn compare_earliest_asc(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
