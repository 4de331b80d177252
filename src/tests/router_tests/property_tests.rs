use crate::db::properties;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, signup, test_app};

const LISTING_FORM: &str =
    "title=Modern+Downtown+Apartment&price=450000&location=New+York%2C+NY&description=City+views&contact=555-0100";

#[test]
fn creating_a_property_requires_login() {
    let app = test_app();
    let result = handle(post_form("/properties", None, LISTING_FORM), &app);

    match result {
        Err(ServerError::Unauthorized(_)) => {}
        other => panic!("expected Unauthorized, got: {:?}", other),
    }
}

#[test]
fn created_property_shows_up_on_the_home_page() {
    let app = test_app();
    let token = signup(&app, "lister@example.com", "secret1");

    let resp = handle(post_form("/properties", Some(&token), LISTING_FORM), &app).unwrap();
    assert_eq!(resp.status(), 302);

    let body = body_string(handle(get("/", None), &app).unwrap());
    assert!(body.contains("Modern Downtown Apartment"));
    assert!(body.contains("₹4,50,000"));
}

#[test]
fn rejects_non_numeric_price() {
    let app = test_app();
    let token = signup(&app, "lister@example.com", "secret1");

    let result = handle(
        post_form("/properties", Some(&token), "title=Flat&price=negotiable"),
        &app,
    );
    match result {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("price")),
        other => panic!("expected BadRequest, got: {:?}", other),
    }
}

#[test]
fn home_search_matches_tokens_and_empty_query_reloads() {
    let app = test_app();
    let token = signup(&app, "lister@example.com", "secret1");

    handle(post_form("/properties", Some(&token), LISTING_FORM), &app).unwrap();
    handle(
        post_form(
            "/properties",
            Some(&token),
            "title=Beach+Villa&price=2500000&location=Miami%2C+FL",
        ),
        &app,
    )
    .unwrap();

    // Token search: one hit.
    let body = body_string(handle(get("/?q=downtown", None), &app).unwrap());
    assert!(body.contains("Modern Downtown Apartment"));
    assert!(!body.contains("Beach Villa"));

    // No hits.
    let body = body_string(handle(get("/?q=castle", None), &app).unwrap());
    assert!(body.contains("No properties found"));

    // Empty query takes the full-reload path: everything is back.
    let body = body_string(handle(get("/?q=", None), &app).unwrap());
    assert!(body.contains("Modern Downtown Apartment"));
    assert!(body.contains("Beach Villa"));
}

#[test]
fn owners_can_edit_their_listing() {
    let app = test_app();
    let token = signup(&app, "owner@example.com", "secret1");
    handle(post_form("/properties", Some(&token), LISTING_FORM), &app).unwrap();

    let id = first_property_id(&app);

    let resp = handle(
        post_form(
            &format!("/properties/{id}/update"),
            Some(&token),
            "title=Renovated+Apartment&price=475000&location=New+York%2C+NY",
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let body = body_string(handle(get("/", None), &app).unwrap());
    assert!(body.contains("Renovated Apartment"));
    assert!(!body.contains("Modern Downtown Apartment"));
}

#[test]
fn other_users_cannot_touch_a_listing() {
    let app = test_app();
    let owner = signup(&app, "owner@example.com", "secret1");
    handle(post_form("/properties", Some(&owner), LISTING_FORM), &app).unwrap();

    let id = first_property_id(&app);
    let intruder = signup(&app, "intruder@example.com", "secret1");

    let edit = handle(get(&format!("/properties/{id}/edit"), Some(&intruder)), &app);
    match edit {
        Err(ServerError::Forbidden(_)) => {}
        other => panic!("expected Forbidden, got: {:?}", other),
    }

    let delete = handle(
        post_form(&format!("/properties/{id}/delete"), Some(&intruder), ""),
        &app,
    );
    match delete {
        Err(ServerError::Forbidden(_)) => {}
        other => panic!("expected Forbidden, got: {:?}", other),
    }

    // Still there.
    let remaining = app
        .db
        .with_conn(|conn| properties::count_all(conn))
        .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn owners_can_delete_their_listing() {
    let app = test_app();
    let token = signup(&app, "owner@example.com", "secret1");
    handle(post_form("/properties", Some(&token), LISTING_FORM), &app).unwrap();

    let id = first_property_id(&app);
    let resp = handle(
        post_form(&format!("/properties/{id}/delete"), Some(&token), ""),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let remaining = app
        .db
        .with_conn(|conn| properties::count_all(conn))
        .unwrap();
    assert_eq!(remaining, 0);
}

fn first_property_id(app: &crate::config::App) -> String {
    app.db
        .with_conn(|conn| properties::list_all(conn))
        .unwrap()
        .first()
        .expect("expected at least one property")
        .id
        .clone()
}
