//! HTTP route handlers for the kiosk API.
//!
//! # Route Structure (nested under `/api`)
//!
//! ```text
//! GET  /                                  - API banner
//!
//! # Settings & admin
//! GET  /settings                          - Public store settings (no PIN)
//! PUT  /settings                          - Partial settings update
//! POST /admin/verify-pin                  - Check the admin PIN -> {ok}
//!
//! # Sessions (kiosk + phone)
//! POST /sessions                          - Create an upload session (QR target)
//! GET  /sessions/{session_id}             - Session + photos (kiosk polls this)
//! GET  /sessions/{session_id}/photos      - Photo list only
//! POST /sessions/{session_id}/photos      - Multipart photo upload from the phone
//! POST /sessions/{session_id}/orders      - Price the session into an order
//!
//! # Orders (print view)
//! GET  /orders/{order_number}             - Order + photos for printing
//! POST /orders/{order_number}/mark-printed - afterprint callback
//! ```
//!
//! Uploaded files themselves are served by a `ServeDir` mounted at
//! `/api/uploads` in `main.rs`.

pub mod admin;
pub mod orders;
pub mod sessions;
pub mod settings;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// API banner, handy as a smoke test from a phone browser.
async fn root() -> Json<Value> {
    Json(json!({ "message": "Photo Kiosk API" }))
}

/// Create the session routes router.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create))
        .route("/sessions/{session_id}", get(sessions::show))
        .route(
            "/sessions/{session_id}/photos",
            get(sessions::list_photos).post(sessions::upload_photos),
        )
        .route("/sessions/{session_id}/orders", post(orders::create))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders/{order_number}", get(orders::show))
        .route("/orders/{order_number}/mark-printed", post(orders::mark_printed))
}

/// Create the settings and admin routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::show).put(settings::update))
        .route("/admin/verify-pin", post(admin::verify_pin))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(settings_routes())
        .merge(session_routes())
        .merge(order_routes())
}
