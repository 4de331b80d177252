use crate::config::{App, AppConfig};
use crate::db::connection::{init_db, Database};
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns a fresh test database using the production schema
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "property_expert_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db, "sql/schema.sql").unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// App state with the default admin allowlist (admin@gmail.com).
pub fn test_app() -> App {
    App {
        db: init_test_db(),
        cfg: AppConfig::default(),
    }
}

pub fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, session, None)
}

pub fn post_form(uri: &str, session: Option<&str>, form: &str) -> Request<Body> {
    request(Method::POST, uri, session, Some(form))
}

fn request(method: Method, uri: &str, session: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    let body = match form {
        Some(form) => {
            builder = builder.header("Content-Type", "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

/// Pull the session token out of a Set-Cookie response header.
pub fn session_from(resp: &Response) -> String {
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("expected a Set-Cookie header")
        .to_str()
        .unwrap();
    cookie
        .split(';')
        .next()
        .unwrap()
        .strip_prefix("session=")
        .expect("expected a session cookie")
        .to_string()
}

/// Sign up a fresh account and return its session token.
pub fn signup(app: &App, email: &str, password: &str) -> String {
    let req = post_form(
        "/signup",
        None,
        &format!("email={email}&password={password}&confirm={password}"),
    );
    let resp = handle(req, app).expect("signup failed");
    assert_eq!(resp.status(), 302, "signup should redirect");
    session_from(&resp)
}

pub fn location_header(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .expect("expected a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
