// src/domain/property.rs

use serde::{Deserialize, Serialize};

/// Shown whenever a listing has no usable image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300?text=No+Image+Available";

/// A property listing as read back from the store, with the loosely
/// typed columns already normalized (see `domain::normalize`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Store-assigned opaque id.
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    /// Normalized price; `None` covers absent and malformed values alike.
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub owner_user_id: Option<i64>,
    /// Lowercase tokens derived from title and location.
    pub search_terms: Vec<String>,
    /// Unix seconds; `None` covers absent and unparseable values alike.
    pub created_at: Option<i64>,
}

impl PropertyRecord {
    /// Price usable in numeric aggregates. Normalization already rejects
    /// non-finite and negative values, so this is a plain passthrough
    /// kept as the single place that rule is spelled out.
    pub fn valid_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p >= 0.0)
    }

    /// Location for grouping purposes; blank and missing both fall into
    /// the "Unknown" bucket.
    pub fn effective_location(&self) -> &str {
        match self.location.as_deref() {
            Some(loc) if !loc.trim().is_empty() => loc,
            _ => "Unknown",
        }
    }

    pub fn display_image_url(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }
}

/// Tokens for store-side search: the whole title and location
/// (lowercased) plus each of their words, deduplicated in first-seen
/// order. A search query matches a listing when it equals one token.
pub fn derive_search_terms(title: &str, location: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    let mut push = |t: String| {
        if !t.is_empty() && !terms.contains(&t) {
            terms.push(t);
        }
    };

    let title = title.trim().to_lowercase();
    let location = location.trim().to_lowercase();

    push(title.clone());
    push(location.clone());
    for word in title.split_whitespace() {
        push(word.to_string());
    }
    for word in location.split_whitespace() {
        push(word.to_string());
    }

    terms
}
