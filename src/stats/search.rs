// src/stats/search.rs
//
// In-memory substring filters for the dashboard's search boxes. Pure and
// synchronous: the arrays were already fetched, nothing here touches the
// store. The empty-query case is the routes' cue to reload from the
// store instead of filtering; these functions are only reached with a
// non-empty query.

use crate::domain::property::PropertyRecord;
use crate::domain::user::UserRecord;

/// Case-insensitive substring match on title or location.
pub fn filter_properties<'a>(
    query: &str,
    properties: &'a [PropertyRecord],
) -> Vec<&'a PropertyRecord> {
    let needle = query.to_lowercase();
    properties
        .iter()
        .filter(|p| {
            contains(Some(p.title.as_str()), &needle) || contains(p.location.as_deref(), &needle)
        })
        .collect()
}

/// Case-insensitive substring match on name, email or phone.
pub fn filter_users<'a>(query: &str, users: &'a [UserRecord]) -> Vec<&'a UserRecord> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            contains(u.name.as_deref(), &needle)
                || contains(Some(u.email.as_str()), &needle)
                || contains(u.phone.as_deref(), &needle)
        })
        .collect()
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|f| f.to_lowercase().contains(needle))
        .unwrap_or(false)
}
