//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! kiosk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `KIOSK_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded in
//! the server library at compile time.

use photo_kiosk_server::db::{self, MIGRATOR};

use super::{CommandError, database_url};

/// Run all pending kiosk database migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to kiosk database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
