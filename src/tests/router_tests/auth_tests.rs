use crate::router::handle;
use crate::tests::utils::{body_string, get, location_header, post_form, signup, test_app};

#[test]
fn signup_logs_the_user_in() {
    let app = test_app();
    let token = signup(&app, "new@example.com", "secret1");

    // The session cookie should resolve to the new account on the next
    // request.
    let resp = handle(get("/", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("new@example.com"), "header should show the signed-in email");
}

#[test]
fn signup_rejects_mismatched_passwords() {
    let app = test_app();
    let req = post_form("/signup", None, "email=a@b.com&password=secret1&confirm=other12");
    let resp = handle(req, &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Passwords do not match"));
}

#[test]
fn signup_rejects_duplicate_email() {
    let app = test_app();
    signup(&app, "dupe@example.com", "secret1");

    let req = post_form(
        "/signup",
        None,
        "email=dupe@example.com&password=secret1&confirm=secret1",
    );
    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("already exists"));
}

#[test]
fn login_round_trip() {
    let app = test_app();
    signup(&app, "back@example.com", "secret1");

    // Wrong password first.
    let resp = handle(
        post_form("/login", None, "email=back@example.com&password=wrong99"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Invalid email or password."));

    // Then the real one.
    let resp = handle(
        post_form("/login", None, "email=back@example.com&password=secret1"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/");
}

#[test]
fn logout_revokes_the_session() {
    let app = test_app();
    let token = signup(&app, "out@example.com", "secret1");

    let resp = handle(post_form("/logout", Some(&token), ""), &app).unwrap();
    assert_eq!(resp.status(), 302);

    // The old token no longer grants access to a protected page.
    let resp = handle(get("/my-properties", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location_header(&resp), "/login");
}
