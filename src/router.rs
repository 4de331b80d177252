// src/router.rs

use std::collections::HashMap;
use std::io::Read;
use std::thread;

use astra::Request;
use url::form_urlencoded;

use crate::auth::{admin, normalize_email, password, sessions};
use crate::config::App;
use crate::db::connection::Database;
use crate::db::{properties, reports, users};
use crate::domain::property::PropertyRecord;
use crate::errors::ServerError;
use crate::jobs;
use crate::responses::{
    html_response, json_response, redirect, redirect_with_cookie, ResultResp,
};
use crate::stats::aggregate::{aggregate, WEEK_SECS};
use crate::stats::rankings::{recent_properties, RECENT_LIMIT};
use crate::stats::search;
use crate::templates::pages;
use crate::templates::pages::admin_dashboard::{ChartData, DashboardVm, StatCards};
use crate::templates::PageChrome;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().trim_matches('/').to_string();
    let segments: Vec<&str> = path.split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => home(&req, app),
        ("GET", ["static", "main.css"]) => stylesheet(),

        // Accounts
        ("GET", ["login"]) => html_response(pages::auth::login_page(None)),
        ("POST", ["login"]) => login_submit(&mut req, app),
        ("GET", ["signup"]) => html_response(pages::auth::signup_page(None)),
        ("POST", ["signup"]) => signup_submit(&mut req, app),
        ("POST", ["logout"]) => logout(&req, app),

        // Listings
        ("GET", ["add"]) => add_property_form(&req, app),
        ("POST", ["properties"]) => create_property(&mut req, app),
        ("GET", ["my-properties"]) => my_properties(&req, app),
        ("GET", ["properties", id, "edit"]) => edit_property_form(&req, app, id),
        ("POST", ["properties", id, "update"]) => update_property(&mut req, app, id),
        ("POST", ["properties", id, "delete"]) => delete_property(&req, app, id),

        // Admin
        ("GET", ["admin", "login"]) => admin_login_form(&req),
        ("POST", ["admin", "login"]) => admin_login_submit(&mut req, app),
        ("GET", ["admin"]) => admin_dashboard(&req, app),
        ("GET", ["admin", "report"]) => admin_report_json(&req, app),
        ("POST", ["admin", "report"]) => admin_report_refresh(&req, app),

        _ => Err(ServerError::NotFound),
    }
}

// ---------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------

fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => form_urlencoded::parse(q.as_bytes()).into_owned().collect(),
        None => HashMap::new(),
    }
}

fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|_| ServerError::BadRequest("unreadable request body".into()))?;

    Ok(form_urlencoded::parse(&buf).into_owned().collect())
}

/// Form field, trimmed; empty collapses to None.
fn optional_field(form: &HashMap<String, String>, key: &str) -> Option<String> {
    form.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_field(form: &HashMap<String, String>, key: &str) -> Result<String, ServerError> {
    optional_field(form, key).ok_or_else(|| ServerError::BadRequest(format!("{key} is required")))
}

/// Resolve the viewer from the session cookie, if any.
fn current_user(req: &Request, app: &App) -> Result<Option<(i64, String)>, ServerError> {
    let Some(cookie) = req.headers().get("Cookie").and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };
    let Some(token) = sessions::token_from_cookie_header(cookie) else {
        return Ok(None);
    };

    let now = jobs::now_unix();
    app.db
        .with_conn(|conn| sessions::load_user_from_session(conn, token, now))
}

fn chrome_for(user: &Option<(i64, String)>, app: &App) -> PageChrome {
    PageChrome {
        user_email: user.as_ref().map(|(_, email)| email.clone()),
        is_admin: user
            .as_ref()
            .map(|(_, email)| admin::is_admin_email(&app.cfg.admin_emails, email))
            .unwrap_or(false),
    }
}

// ---------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------

fn home(req: &Request, app: &App) -> ResultResp {
    let user = current_user(req, app)?;
    let query = parse_query(req);
    let q = query.get("q").map(|s| s.trim().to_string()).unwrap_or_default();

    // An empty query is the full-reload path, not a filter of whatever
    // happened to be on screen before.
    let listings = if q.is_empty() {
        let all = app.db.with_conn(|conn| properties::list_all(conn))?;
        recent_properties(&all, all.len())
    } else {
        app.db.with_conn(|conn| properties::search_by_term(conn, &q))?
    };

    html_response(pages::home::home_page(&chrome_for(&user, app), &listings, &q))
}

fn stylesheet() -> ResultResp {
    use astra::{Body, ResponseBuilder};
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/css; charset=utf-8")
        .body(Body::from(include_str!("../static/main.css").to_string()))
        .map_err(|_| ServerError::InternalError)
}

// ---------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------

fn login_submit(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let email = normalize_email(&required_field(&form, "email")?)?;
    let pw = required_field(&form, "password")?;
    let now = jobs::now_unix();

    let session = app.db.with_conn(|conn| {
        let Some(creds) = users::find_credentials(conn, &email)? else {
            return Ok(None);
        };
        if !password::verify(&creds.salt, &creds.hash, &pw) {
            return Ok(None);
        }
        users::touch_last_login(conn, creds.user_id, now)?;
        let token = sessions::create_session(conn, creds.user_id, now)?;
        Ok(Some(token))
    })?;

    match session {
        Some(token) => redirect_with_cookie("/", &sessions::session_cookie(&token)),
        None => html_response(pages::auth::login_page(Some("Invalid email or password."))),
    }
}

fn signup_submit(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;

    let email = match normalize_email(form.get("email").map(String::as_str).unwrap_or("")) {
        Ok(email) => email,
        Err(_) => {
            return html_response(pages::auth::signup_page(Some("Please enter a valid email.")))
        }
    };
    let pw = form.get("password").cloned().unwrap_or_default();
    let confirm = form.get("confirm").cloned().unwrap_or_default();

    if pw.len() < password::MIN_PASSWORD_LEN {
        return html_response(pages::auth::signup_page(Some(
            "Password must be at least 6 characters.",
        )));
    }
    if pw != confirm {
        return html_response(pages::auth::signup_page(Some("Passwords do not match")));
    }

    let now = jobs::now_unix();
    let salt = password::new_salt();
    let hash = password::hash_password(&salt, &pw);

    let created = app.db.with_conn(|conn| {
        match users::create_user(
            conn,
            &email,
            optional_field(&form, "name").as_deref(),
            optional_field(&form, "phone").as_deref(),
            &salt,
            &hash,
            now,
        ) {
            Ok(user_id) => {
                let token = sessions::create_session(conn, user_id, now)?;
                Ok(Some(token))
            }
            Err(ServerError::BadRequest(_)) => Ok(None),
            Err(other) => Err(other),
        }
    })?;

    match created {
        Some(token) => redirect_with_cookie("/", &sessions::session_cookie(&token)),
        None => html_response(pages::auth::signup_page(Some(
            "An account with this email already exists.",
        ))),
    }
}

fn logout(req: &Request, app: &App) -> ResultResp {
    if let Some(token) = req
        .headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(sessions::token_from_cookie_header)
    {
        let now = jobs::now_unix();
        app.db
            .with_conn(|conn| sessions::revoke_session(conn, token, now))?;
    }
    redirect_with_cookie("/", &sessions::clear_session_cookie())
}

// ---------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------

fn add_property_form(req: &Request, app: &App) -> ResultResp {
    let user = current_user(req, app)?;
    if user.is_none() {
        return redirect("/login");
    }
    html_response(pages::add_property::add_property_page(
        &chrome_for(&user, app),
        None,
    ))
}

/// Shared form -> PropertyInput mapping for create and update.
fn property_input_from_form(form: &HashMap<String, String>) -> Result<properties::PropertyInput, ServerError> {
    let title = required_field(form, "title")?;

    let price = match optional_field(form, "price") {
        Some(raw) => {
            let parsed: f64 = raw
                .parse()
                .map_err(|_| ServerError::BadRequest("price must be a number".into()))?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ServerError::BadRequest(
                    "price must be a non-negative number".into(),
                ));
            }
            Some(parsed)
        }
        None => None,
    };

    // A pasted image link only survives when it parses as an absolute
    // URL; anything else falls back to the placeholder at render time.
    let image_url =
        optional_field(form, "image_url").filter(|raw| url::Url::parse(raw).is_ok());

    Ok(properties::PropertyInput {
        title,
        location: optional_field(form, "location"),
        description: optional_field(form, "description"),
        contact: optional_field(form, "contact"),
        price,
        image_url,
    })
}

fn create_property(req: &mut Request, app: &App) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return Err(ServerError::Unauthorized(
            "You must be logged in to add a property".into(),
        ));
    };

    let form = parse_form(req)?;
    let input = property_input_from_form(&form)?;
    let now = jobs::now_unix();

    let id = app
        .db
        .with_conn(|conn| properties::insert_property(conn, &input, Some(user_id), now))?;
    println!("🏠 Property added: {id}");

    redirect("/my-properties")
}

fn my_properties(req: &Request, app: &App) -> ResultResp {
    let user = current_user(req, app)?;
    let Some((user_id, _)) = user.as_ref() else {
        return redirect("/login");
    };
    let user_id = *user_id;

    let own = app
        .db
        .with_conn(|conn| properties::list_by_owner(conn, user_id))?;
    let own = recent_properties(&own, own.len());

    html_response(pages::manage::manage_page(&chrome_for(&user, app), &own))
}

/// Fetch a property and enforce that the viewer owns it.
fn owned_property(app: &App, user_id: i64, id: &str) -> Result<PropertyRecord, ServerError> {
    let property = app
        .db
        .with_conn(|conn| properties::get_by_id(conn, id))?
        .ok_or(ServerError::NotFound)?;

    if property.owner_user_id != Some(user_id) {
        return Err(ServerError::Forbidden(
            "You can only manage your own properties.".into(),
        ));
    }
    Ok(property)
}

fn edit_property_form(req: &Request, app: &App, id: &str) -> ResultResp {
    let user = current_user(req, app)?;
    let Some((user_id, _)) = user.as_ref() else {
        return redirect("/login");
    };

    let property = owned_property(app, *user_id, id)?;
    html_response(pages::edit_property::edit_property_page(
        &chrome_for(&user, app),
        &property,
    ))
}

fn update_property(req: &mut Request, app: &App, id: &str) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect("/login");
    };
    owned_property(app, user_id, id)?;

    let form = parse_form(req)?;
    let input = property_input_from_form(&form)?;

    app.db
        .with_conn(|conn| properties::update_property(conn, id, &input))?;

    redirect("/my-properties")
}

fn delete_property(req: &Request, app: &App, id: &str) -> ResultResp {
    let Some((user_id, _)) = current_user(req, app)? else {
        return redirect("/login");
    };
    owned_property(app, user_id, id)?;

    app.db
        .with_conn(|conn| properties::delete_property(conn, id))?;
    println!("🗑️ Property deleted: {id}");

    redirect("/my-properties")
}

// ---------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------

const ADMIN_DENIED_MSG: &str = "Access denied. Admin privileges required.";

fn admin_login_form(req: &Request) -> ResultResp {
    let query = parse_query(req);
    let error = if query.contains_key("denied") {
        Some(ADMIN_DENIED_MSG)
    } else {
        None
    };
    html_response(pages::admin_login::admin_login_page(error))
}

fn admin_login_submit(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let email = normalize_email(&required_field(&form, "email")?)?;
    let pw = required_field(&form, "password")?;
    let now = jobs::now_unix();

    // Authenticate first, then apply the allowlist: a valid password on
    // a non-admin account is still a denial and leaves no session behind.
    let outcome = app.db.with_conn(|conn| {
        let Some(creds) = users::find_credentials(conn, &email)? else {
            return Ok(AdminLogin::BadCredentials);
        };
        if !password::verify(&creds.salt, &creds.hash, &pw) {
            return Ok(AdminLogin::BadCredentials);
        }
        if !admin::is_admin_email(&app.cfg.admin_emails, &creds.email) {
            return Ok(AdminLogin::NotAdmin);
        }
        users::touch_last_login(conn, creds.user_id, now)?;
        let token = sessions::create_session(conn, creds.user_id, now)?;
        Ok(AdminLogin::Ok(token))
    })?;

    match outcome {
        AdminLogin::Ok(token) => redirect_with_cookie("/admin", &sessions::session_cookie(&token)),
        AdminLogin::NotAdmin => {
            html_response(pages::admin_login::admin_login_page(Some(ADMIN_DENIED_MSG)))
        }
        AdminLogin::BadCredentials => html_response(pages::admin_login::admin_login_page(Some(
            "Invalid email or password.",
        ))),
    }
}

enum AdminLogin {
    Ok(String),
    NotAdmin,
    BadCredentials,
}

/// Resolve the viewer and require allowlisted admin access; `Err` holds
/// the redirect target for the two failure shapes.
fn require_admin(req: &Request, app: &App) -> Result<(i64, String), ResultResp> {
    match current_user(req, app) {
        Ok(Some((user_id, email))) => {
            if admin::is_admin_email(&app.cfg.admin_emails, &email) {
                Ok((user_id, email))
            } else {
                Err(redirect("/admin/login?denied=1"))
            }
        }
        Ok(None) => Err(redirect("/admin/login")),
        Err(e) => Err(Err(e)),
    }
}

fn admin_dashboard(req: &Request, app: &App) -> ResultResp {
    let (_, email) = match require_admin(req, app) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let query = parse_query(req);
    let pq = query.get("pq").map(|s| s.trim().to_string()).unwrap_or_default();
    let uq = query.get("uq").map(|s| s.trim().to_string()).unwrap_or_default();

    let now = jobs::now_unix();
    let db = &app.db;

    // Four independent reads fan out; each pane fails (or succeeds) on
    // its own and the page renders whatever came back.
    let (stats_pane, props_pane, users_pane, charts_pane) = thread::scope(|s| {
        let h_stats = s.spawn(|| load_stat_cards(db, now));
        let h_props = s.spawn(|| load_properties_pane(db));
        let h_users = s.spawn(|| db.with_conn(|conn| users::list_all(conn)));
        let h_charts = s.spawn(|| load_chart_data(db, now));
        (
            join_pane(h_stats),
            join_pane(h_props),
            join_pane(h_users),
            join_pane(h_charts),
        )
    });

    // Last persisted scheduled report, best effort.
    let latest_report = db
        .with_conn(|conn| reports::load_latest(conn))
        .unwrap_or(None);

    // Empty search queries mean "show the fresh load", not "filter".
    let properties_pane = props_pane.map(|pane| {
        if pq.is_empty() {
            pane.recent
        } else {
            search::filter_properties(&pq, &pane.all)
                .into_iter()
                .cloned()
                .collect()
        }
    });
    let users_pane = users_pane.map(|all| {
        if uq.is_empty() {
            all
        } else {
            search::filter_users(&uq, &all).into_iter().cloned().collect()
        }
    });

    let vm = DashboardVm {
        email,
        stats: stats_pane,
        properties_pane,
        property_query: pq,
        users_pane,
        user_query: uq,
        charts: charts_pane,
        latest_report,
    };

    html_response(pages::admin_dashboard::dashboard_page(&vm))
}

fn admin_report_json(req: &Request, app: &App) -> ResultResp {
    if let Err(resp) = require_admin(req, app) {
        return resp;
    }

    let report = app
        .db
        .with_conn(|conn| reports::load_latest(conn))?
        .ok_or(ServerError::NotFound)?;

    json_response(&report)
}

fn admin_report_refresh(req: &Request, app: &App) -> ResultResp {
    if let Err(resp) = require_admin(req, app) {
        return resp;
    }

    let report = jobs::run_report_job(&app.db, jobs::now_unix())?;
    println!(
        "📊 Report regenerated on demand: {} properties",
        report.totals.property_count
    );

    redirect("/admin")
}

// ---------------------------------------------------------------------
// Dashboard panes
// ---------------------------------------------------------------------

struct PropertiesPane {
    /// Full collection, kept for the search box.
    all: Vec<PropertyRecord>,
    /// Store-side order-and-limit read.
    recent: Vec<PropertyRecord>,
}

fn join_pane<T>(handle: thread::ScopedJoinHandle<'_, Result<T, ServerError>>) -> Result<T, String> {
    match handle.join() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("dashboard worker panicked".to_string()),
    }
}

fn load_stat_cards(db: &Database, now: i64) -> Result<StatCards, ServerError> {
    db.with_conn(|conn| {
        let total_properties = properties::count_all(conn)?;
        let total_users = users::count_all(conn)?;
        let listed_last_week = properties::count_created_since(conn, now - WEEK_SECS)?;

        let all = properties::list_all(conn)?;
        let stats = aggregate(&all, now);

        Ok(StatCards {
            total_properties,
            total_users,
            listed_last_week,
            average_price: stats.average_price,
        })
    })
}

fn load_properties_pane(db: &Database) -> Result<PropertiesPane, ServerError> {
    db.with_conn(|conn| {
        Ok(PropertiesPane {
            all: properties::list_all(conn)?,
            recent: properties::recent(conn, RECENT_LIMIT as i64)?,
        })
    })
}

fn load_chart_data(db: &Database, now: i64) -> Result<ChartData, ServerError> {
    db.with_conn(|conn| {
        let all = properties::list_all(conn)?;
        let stats = aggregate(&all, now);
        Ok(ChartData {
            top_locations: stats.top_locations,
            price_ranges: stats.price_ranges,
            monthly: stats.monthly,
        })
    })
}
