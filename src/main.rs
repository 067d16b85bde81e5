// Define data modules
mod models; // Data structures (Trip, LogSheet, Entry, etc.)
mod store;  // Persistent storage (load/save db.json)
mod logic;  // Trip log generation
mod routes_trips;   // HTTP handlers for trip APIs
mod routes_logs;    // HTTP handlers for log sheet & entry APIs

// Import axum routing utilities and Router
use axum::{
    routing::get, // HTTP method helpers
    Router, // Main router type
};
use tower_http::services::ServeDir; // Used to serve static files (HTML/CSS/JS)
use std::net::SocketAddr;


#[tokio::main]
async fn main() {
    env_logger::init();

    let api = Router::new()
        // trips
        .route("/trips", get(routes_trips::get_trips).post(routes_trips::create_trip))
        .route("/trips/:id", get(routes_trips::get_trip).delete(routes_trips::delete_trip))
        // log sheets
        .route("/logsheets", get(routes_logs::get_logsheets).post(routes_logs::create_logsheet))
        .route("/logsheets/:id", get(routes_logs::get_logsheet))
        // entries
        .route("/entries", get(routes_logs::get_entries).post(routes_logs::create_entry))
        .route(
            "/entries/:id",
            get(routes_logs::get_entry)
                .put(routes_logs::update_entry)
                .delete(routes_logs::delete_entry),
        );

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"));

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();

    log::info!("server running at http://{}", addr);
    log::info!("static files: http://{}/", addr);
    log::info!("API base:     http://{}/api", addr);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
