//! Settings repository.
//!
//! One global row keyed `'global'`, created with factory defaults the first
//! time anything reads it. Updates merge over the current row, mirroring the
//! partial-update semantics of the admin screen.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use photo_kiosk_core::{AdminPin, CurrencyCode};

use super::RepositoryError;
use crate::models::StoreSettings;

const GLOBAL_KEY: &str = "global";

const SETTINGS_COLUMNS: &str =
    "store_name, currency, price_per_photo_cents, receipt_footer, admin_pin, updated_at";

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct SettingsPatch {
    pub store_name: Option<String>,
    pub currency: Option<CurrencyCode>,
    pub price_per_photo_cents: Option<i64>,
    pub receipt_footer: Option<String>,
    pub admin_pin: Option<AdminPin>,
}

impl SettingsPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.store_name.is_none()
            && self.currency.is_none()
            && self.price_per_photo_cents.is_none()
            && self.receipt_footer.is_none()
            && self.admin_pin.is_none()
    }
}

/// Repository for the store settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row if it exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<StoreSettings>, RepositoryError> {
        let settings = sqlx::query_as::<_, StoreSettings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings WHERE key = ?1",
        ))
        .bind(GLOBAL_KEY)
        .fetch_optional(self.pool)
        .await?;

        Ok(settings)
    }

    /// Fetch the settings row, installing factory defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn ensure(&self, now: DateTime<Utc>) -> Result<StoreSettings, RepositoryError> {
        if let Some(existing) = self.get().await? {
            return Ok(existing);
        }

        let defaults = StoreSettings::defaults(now);
        // INSERT OR IGNORE: two racing first reads both succeed.
        sqlx::query(&format!(
            "INSERT OR IGNORE INTO settings (key, {SETTINGS_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        ))
        .bind(GLOBAL_KEY)
        .bind(&defaults.store_name)
        .bind(defaults.currency)
        .bind(defaults.price_per_photo_cents)
        .bind(&defaults.receipt_footer)
        .bind(&defaults.admin_pin)
        .bind(defaults.updated_at)
        .execute(self.pool)
        .await?;

        self.get()
            .await?
            .ok_or_else(|| RepositoryError::DataCorruption("settings row vanished".to_owned()))
    }

    /// Apply a partial update over the current settings.
    ///
    /// An empty patch returns the current row untouched (no `updated_at`
    /// bump).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn update(
        &self,
        patch: SettingsPatch,
        now: DateTime<Utc>,
    ) -> Result<StoreSettings, RepositoryError> {
        let current = self.ensure(now).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let merged = StoreSettings {
            store_name: patch.store_name.unwrap_or(current.store_name),
            currency: patch.currency.unwrap_or(current.currency),
            price_per_photo_cents: patch
                .price_per_photo_cents
                .unwrap_or(current.price_per_photo_cents),
            receipt_footer: patch.receipt_footer.unwrap_or(current.receipt_footer),
            admin_pin: patch.admin_pin.unwrap_or(current.admin_pin),
            updated_at: now,
        };

        sqlx::query(
            "UPDATE settings SET store_name = ?1, currency = ?2, \
             price_per_photo_cents = ?3, receipt_footer = ?4, admin_pin = ?5, \
             updated_at = ?6 WHERE key = ?7",
        )
        .bind(&merged.store_name)
        .bind(merged.currency)
        .bind(merged.price_per_photo_cents)
        .bind(&merged.receipt_footer)
        .bind(&merged.admin_pin)
        .bind(merged.updated_at)
        .bind(GLOBAL_KEY)
        .execute(self.pool)
        .await?;

        Ok(merged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_ensure_installs_defaults_once() {
        let pool = memory_pool().await;
        let repo = SettingsRepository::new(&pool);

        assert!(repo.get().await.unwrap().is_none());

        let first = repo.ensure(Utc::now()).await.unwrap();
        assert_eq!(first.store_name, "Photo Kiosk");
        assert_eq!(first.price_per_photo_cents, 250);
        assert!(first.admin_pin.verify("1234"));

        let second = repo.ensure(Utc::now()).await.unwrap();
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let pool = memory_pool().await;
        let repo = SettingsRepository::new(&pool);
        repo.ensure(Utc::now()).await.unwrap();

        let patch = SettingsPatch {
            price_per_photo_cents: Some(300),
            currency: Some(CurrencyCode::BRL),
            ..SettingsPatch::default()
        };
        let updated = repo.update(patch, Utc::now()).await.unwrap();

        assert_eq!(updated.price_per_photo_cents, 300);
        assert_eq!(updated.currency, CurrencyCode::BRL);
        assert_eq!(updated.store_name, "Photo Kiosk");
        assert!(updated.admin_pin.verify("1234"));

        // The merged row is what a fresh read sees.
        let reread = repo.get().await.unwrap().unwrap();
        assert_eq!(reread.price_per_photo_cents, 300);
        assert_eq!(reread.currency, CurrencyCode::BRL);
    }

    #[tokio::test]
    async fn test_empty_patch_is_a_no_op() {
        let pool = memory_pool().await;
        let repo = SettingsRepository::new(&pool);
        let before = repo.ensure(Utc::now()).await.unwrap();

        let after = repo
            .update(SettingsPatch::default(), Utc::now())
            .await
            .unwrap();
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_pin_update() {
        let pool = memory_pool().await;
        let repo = SettingsRepository::new(&pool);

        let patch = SettingsPatch {
            admin_pin: Some(AdminPin::parse("987654").unwrap()),
            ..SettingsPatch::default()
        };
        let updated = repo.update(patch, Utc::now()).await.unwrap();

        assert!(updated.admin_pin.verify("987654"));
        assert!(!updated.admin_pin.verify("1234"));
    }
}
