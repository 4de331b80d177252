// src/templates/format.rs
//
// Display formatting shared across pages. Prices render in INR with
// Indian digit grouping (last three digits, then pairs).

pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.abs().to_string();

    let mut grouped = String::new();
    let n = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        let remaining = n - i - 1;
        if remaining == 0 {
            continue;
        }
        // Separators fall before the last 3 digits and then every 2.
        if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
            grouped.push(',');
        }
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Dashboard-style price cell: "N/A" when the record had no valid price.
pub fn price_or_na(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() && p >= 0.0 => format_inr(p.round() as i64),
        _ => "N/A".to_string(),
    }
}

/// Listing-card price: a missing price renders as ₹0.
pub fn price_or_zero(price: Option<f64>) -> String {
    format_inr(price.filter(|p| p.is_finite() && *p >= 0.0).unwrap_or(0.0).round() as i64)
}

/// "DD/MM/YYYY" of the UTC calendar date, or `None` when undated.
pub fn format_date(ts: Option<i64>) -> Option<String> {
    let dt = chrono::DateTime::from_timestamp(ts?, 0)?;
    Some(dt.format("%d/%m/%Y").to_string())
}
