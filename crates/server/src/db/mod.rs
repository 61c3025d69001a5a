//! Database operations for the kiosk `SQLite` store.
//!
//! # Tables
//!
//! - `sessions` - Upload sessions created at the kiosk
//! - `photos` - Uploaded photo metadata (bytes live on disk in the upload dir)
//! - `orders` - Priced snapshots of a session's photos
//! - `order_photos` - Ordered photo membership of each order
//! - `settings` - Store configuration singleton
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p photo-kiosk-cli -- migrate
//! ```

pub mod orders;
pub mod photos;
pub mod sessions;
pub mod settings;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use orders::OrderRepository;
pub use photos::PhotoRepository;
pub use sessions::SessionRepository;
pub use settings::{SettingsPatch, SettingsRepository};

/// Embedded migrations from `crates/server/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate file key).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first connect; WAL mode keeps the kiosk
/// poller and phone uploads from blocking each other.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
