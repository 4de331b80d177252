use crate::db::reports;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location_header, post_form, signup, test_app};

const LISTING_FORM: &str =
    "title=Modern+Downtown+Apartment&price=450000&location=New+York%2C+NY";

#[test]
fn dashboard_redirects_anonymous_visitors() {
    let app = test_app();
    let resp = handle(get("/admin", None), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/admin/login");
}

#[test]
fn dashboard_denies_non_admins_with_a_message() {
    let app = test_app();
    let token = signup(&app, "user@example.com", "secret1");

    // Redirected away with the denial flag...
    let resp = handle(get("/admin", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/admin/login?denied=1");

    // ...and the login page spells out why.
    let body = body_string(handle(get("/admin/login?denied=1", None), &app).unwrap());
    assert!(body.contains("Access denied. Admin privileges required."));
}

#[test]
fn admin_login_applies_the_allowlist_after_authentication() {
    let app = test_app();
    signup(&app, "user@example.com", "secret1");

    // Correct credentials, but not on the allowlist.
    let resp = handle(
        post_form("/admin/login", None, "email=user@example.com&password=secret1"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Access denied. Admin privileges required."));
}

#[test]
fn allowlisted_admin_reaches_the_dashboard() {
    let app = test_app();
    let admin = signup(&app, "admin@gmail.com", "secret1");
    handle(post_form("/properties", Some(&admin), LISTING_FORM), &app).unwrap();

    let resp = handle(get("/admin", Some(&admin)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("Total Properties"));
    assert!(body.contains("admin@gmail.com"));
    assert!(body.contains("Modern Downtown Apartment"));
}

#[test]
fn admin_login_form_logs_an_admin_in() {
    let app = test_app();
    signup(&app, "admin@gmail.com", "secret1");

    let resp = handle(
        post_form("/admin/login", None, "email=admin@gmail.com&password=secret1"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/admin");
}

#[test]
fn dashboard_property_search_filters_by_substring() {
    let app = test_app();
    let admin = signup(&app, "admin@gmail.com", "secret1");
    handle(post_form("/properties", Some(&admin), LISTING_FORM), &app).unwrap();
    handle(
        post_form(
            "/properties",
            Some(&admin),
            "title=Beach+Villa&price=2500000&location=Miami%2C+FL",
        ),
        &app,
    )
    .unwrap();

    // Substring, not token: "down" matches here.
    let body = body_string(handle(get("/admin?pq=down", Some(&admin)), &app).unwrap());
    assert!(body.contains("Modern Downtown Apartment"));
    assert!(!body.contains("Beach Villa"));

    let body = body_string(handle(get("/admin?pq=zzz", Some(&admin)), &app).unwrap());
    assert!(body.contains("No properties found matching your search"));
}

#[test]
fn report_endpoint_is_empty_until_a_run_happens() {
    let app = test_app();
    let admin = signup(&app, "admin@gmail.com", "secret1");

    match handle(get("/admin/report", Some(&admin)), &app) {
        Err(ServerError::NotFound) => {}
        other => panic!("expected NotFound, got: {:?}", other),
    }
}

#[test]
fn manual_refresh_persists_a_report() {
    let app = test_app();
    let admin = signup(&app, "admin@gmail.com", "secret1");
    handle(post_form("/properties", Some(&admin), LISTING_FORM), &app).unwrap();

    let resp = handle(post_form("/admin/report", Some(&admin), ""), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/admin");

    let stored = app
        .db
        .with_conn(|conn| reports::load_latest(conn))
        .unwrap()
        .expect("a report should be persisted");
    assert_eq!(stored.totals.property_count, 1);
    assert_eq!(stored.totals.distinct_user_count, 1);
    assert_eq!(stored.top_locations[0].location, "New York, NY");

    // And the JSON endpoint serves it.
    let resp = handle(get("/admin/report", Some(&admin)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json; charset=utf-8"
    );
    let body = body_string(resp);
    assert!(body.contains("\"property_count\":1"));
    assert!(body.contains("\"user_leaderboard\""));
}
