//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] photo_kiosk_server::db::RepositoryError),

    #[error("Invalid PIN: {0}")]
    InvalidPin(#[from] photo_kiosk_core::PinError),
}

/// Resolve the kiosk database URL from the environment.
///
/// Loads `.env` if present, then tries `KIOSK_DATABASE_URL` with a fallback
/// to the generic `DATABASE_URL`.
pub(crate) fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("KIOSK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("KIOSK_DATABASE_URL"))
}
