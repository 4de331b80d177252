// src/domain/normalize.rs
//
// The store keeps record fields loosely typed: `created_at` may hold unix
// seconds, unix milliseconds, or a text timestamp, and `price` may hold
// anything a form once submitted. Every read goes through this module so
// the rest of the crate only ever sees unix seconds and finite prices.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::types::ValueRef;

/// Integer timestamps at or above this value are treated as epoch
/// milliseconds rather than seconds (no property on this site predates
/// 1970, and seconds won't reach this range for millennia).
const EPOCH_MILLIS_CUTOVER: i64 = 100_000_000_000;

/// Normalize a raw `created_at` column value to unix seconds.
/// Unparseable values come back as `None`, never an error; the record
/// still counts toward totals, it just has no date.
pub fn created_at(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(n) => Some(scale_epoch(n)),
        ValueRef::Real(f) if f.is_finite() => Some(scale_epoch(f as i64)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_timestamp_text),
        _ => None,
    }
}

/// Normalize a raw `price` column value. Anything that is not a finite,
/// non-negative number is `None` and stays out of price aggregates.
pub fn price(value: ValueRef<'_>) -> Option<f64> {
    let n = match value {
        ValueRef::Integer(n) => Some(n as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok()),
        _ => None,
    }?;
    if n.is_finite() && n >= 0.0 {
        Some(n)
    } else {
        None
    }
}

fn scale_epoch(n: i64) -> i64 {
    if n >= EPOCH_MILLIS_CUTOVER {
        n / 1000
    } else {
        n
    }
}

/// Accepts RFC 3339, SQLite's default "YYYY-MM-DD HH:MM:SS", and a bare
/// "YYYY-MM-DD" (read as midnight UTC).
fn parse_timestamp_text(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::ValueRef;

    #[test]
    fn created_at_accepts_epoch_seconds() {
        assert_eq!(created_at(ValueRef::Integer(1_700_000_000)), Some(1_700_000_000));
    }

    #[test]
    fn created_at_scales_epoch_millis() {
        assert_eq!(
            created_at(ValueRef::Integer(1_700_000_000_000)),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn created_at_parses_text_forms() {
        assert_eq!(
            created_at(ValueRef::Text(b"2023-11-14T22:13:20+00:00")),
            Some(1_700_000_000)
        );
        assert_eq!(
            created_at(ValueRef::Text(b"2023-11-14 22:13:20")),
            Some(1_700_000_000)
        );
        assert_eq!(
            created_at(ValueRef::Text(b"2023-11-14")),
            Some(1_699_920_000)
        );
    }

    #[test]
    fn created_at_treats_garbage_as_missing() {
        assert_eq!(created_at(ValueRef::Null), None);
        assert_eq!(created_at(ValueRef::Text(b"soon")), None);
        assert_eq!(created_at(ValueRef::Text(&[0xff, 0xfe])), None);
    }

    #[test]
    fn price_rejects_negative_and_non_numeric() {
        assert_eq!(price(ValueRef::Real(450000.0)), Some(450000.0));
        assert_eq!(price(ValueRef::Integer(0)), Some(0.0));
        assert_eq!(price(ValueRef::Text(b"1250000")), Some(1_250_000.0));
        assert_eq!(price(ValueRef::Real(-1.0)), None);
        assert_eq!(price(ValueRef::Real(f64::NAN)), None);
        assert_eq!(price(ValueRef::Text(b"call me")), None);
        assert_eq!(price(ValueRef::Null), None);
    }
}
