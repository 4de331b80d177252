// src/db/seed.rs
//
// Demo listings inserted on first boot so the site isn't empty. Skipped
// entirely once any property exists.

use crate::db::connection::Database;
use crate::db::properties::{count_all, insert_property, PropertyInput};
use crate::errors::ServerError;

const DEMO_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?auto=format&fit=crop&w=800&q=80";

struct DemoProperty {
    title: &'static str,
    price: f64,
    location: &'static str,
    description: &'static str,
}

const DEMO_PROPERTIES: &[DemoProperty] = &[
    DemoProperty {
        title: "Modern Downtown Apartment",
        price: 450_000.0,
        location: "New York, NY",
        description: "Beautiful modern apartment in the heart of downtown with stunning city views. Walking distance to parks, restaurants, and public transportation.",
    },
    DemoProperty {
        title: "Suburban Family Home",
        price: 750_000.0,
        location: "Austin, TX",
        description: "Spacious family home in a quiet suburban neighborhood. 4 bedrooms, 3 bathrooms, large backyard, and updated kitchen.",
    },
    DemoProperty {
        title: "Luxury Beachfront Villa",
        price: 2_500_000.0,
        location: "Miami, FL",
        description: "Stunning luxury villa directly on the beach with panoramic ocean views, infinity pool, and private beach access.",
    },
    DemoProperty {
        title: "Cozy Mountain Cabin",
        price: 320_000.0,
        location: "Aspen, CO",
        description: "Charming mountain cabin perfect for weekend getaways. Rustic charm with modern amenities, fireplace, and forest views.",
    },
    DemoProperty {
        title: "Urban Loft with City Views",
        price: 620_000.0,
        location: "Chicago, IL",
        description: "Industrial-style loft with exposed brick walls and high ceilings. Open floor plan with large windows.",
    },
    DemoProperty {
        title: "Waterfront Condo",
        price: 895_000.0,
        location: "Seattle, WA",
        description: "Elegant waterfront condo with private balcony overlooking the harbor. Gourmet kitchen and building gym.",
    },
];

/// Returns how many demo listings were inserted (0 when the collection
/// already had data).
pub fn seed_demo_properties(db: &Database, now: i64) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        if count_all(conn)? > 0 {
            return Ok(0);
        }

        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        for demo in DEMO_PROPERTIES {
            let input = PropertyInput {
                title: demo.title.to_string(),
                location: Some(demo.location.to_string()),
                description: Some(demo.description.to_string()),
                contact: None,
                price: Some(demo.price),
                image_url: Some(DEMO_IMAGE_URL.to_string()),
            };
            // Demo rows have no owner; they land in the "Unknown" bucket.
            insert_property(&tx, &input, None, now)?;
        }

        tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(DEMO_PROPERTIES.len())
    })
}
