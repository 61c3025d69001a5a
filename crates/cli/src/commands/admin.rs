//! Admin PIN management.
//!
//! For the operator who changed the PIN on the admin screen and forgot it.

use chrono::Utc;

use photo_kiosk_core::AdminPin;
use photo_kiosk_server::db::{self, SettingsPatch, SettingsRepository};

use super::{CommandError, database_url};

/// Set a new admin PIN, validating the format first.
pub async fn set_pin(pin: &str) -> Result<(), CommandError> {
    let pin = AdminPin::parse(pin)?;

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let patch = SettingsPatch {
        admin_pin: Some(pin),
        ..SettingsPatch::default()
    };
    SettingsRepository::new(&pool).update(patch, Utc::now()).await?;

    tracing::info!("Admin PIN updated");
    Ok(())
}
