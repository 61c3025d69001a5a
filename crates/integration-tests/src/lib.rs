//! Integration tests for Photo Kiosk.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and start the server
//! cargo run -p photo-kiosk-cli -- migrate
//! cargo run -p photo-kiosk-server
//!
//! # Run integration tests against it
//! cargo test -p photo-kiosk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `kiosk_flow` - The full kiosk journey: session, upload, order, print
//! - `settings` - Settings reads/updates and PIN verification
//!
//! Tests are `#[ignore]`d by default since they need a running server;
//! `KIOSK_BASE_URL` points them at it (default `http://localhost:8000`).

/// Base URL for the kiosk API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("KIOSK_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned())
}
