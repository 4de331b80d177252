use crate::config::{App, AppConfig};
use crate::db::connection::{init_db, Database};
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod jobs;
mod responses;
mod router;
mod stats;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Load configuration (env overrides on top of defaults)
    let cfg = AppConfig::from_env();

    // 2️⃣ Create the database handle and apply the schema
    let db = Database::new(cfg.db_path.clone());
    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 3️⃣ Seed demo listings on an empty store
    match db::seed::seed_demo_properties(&db, jobs::now_unix()) {
        Ok(0) => {}
        Ok(n) => println!("🌱 Seeded {n} demo properties"),
        Err(e) => eprintln!("⚠️ Demo seed failed: {e}"),
    }

    // 4️⃣ Start the scheduled report pipeline
    jobs::spawn_report_scheduler(db.clone(), cfg.report_interval_secs);

    // 5️⃣ Start the server
    let addr: SocketAddr = match cfg.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("❌ Invalid bind address {}: {e}", cfg.bind_addr);
            std::process::exit(1);
        }
    };
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);
    let app = App { db, cfg };

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
