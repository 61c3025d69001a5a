//! Read-through cache over the settings singleton.
//!
//! The kiosk home screen and every order creation read settings; a short TTL
//! keeps those reads off the database without making admin edits feel
//! laggy. Updates invalidate immediately.

use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use sqlx::SqlitePool;

use crate::db::{RepositoryError, SettingsPatch, SettingsRepository};
use crate::models::StoreSettings;

const CACHE_KEY: &str = "global";
const CACHE_TTL: Duration = Duration::from_secs(5);

/// Cached access to the store settings singleton.
#[derive(Clone)]
pub struct SettingsService {
    pool: SqlitePool,
    cache: Cache<&'static str, StoreSettings>,
}

impl SettingsService {
    /// Create the service over a pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();

        Self { pool, cache }
    }

    /// Current settings, bootstrapping defaults on first access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database read fails.
    pub async fn current(&self) -> Result<StoreSettings, RepositoryError> {
        if let Some(cached) = self.cache.get(CACHE_KEY).await {
            return Ok(cached);
        }

        let settings = SettingsRepository::new(&self.pool).ensure(Utc::now()).await?;
        self.cache.insert(CACHE_KEY, settings.clone()).await;
        Ok(settings)
    }

    /// Apply a partial update and drop the cached copy.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database write fails.
    pub async fn update(&self, patch: SettingsPatch) -> Result<StoreSettings, RepositoryError> {
        let updated = SettingsRepository::new(&self.pool)
            .update(patch, Utc::now())
            .await?;
        self.cache.invalidate(CACHE_KEY).await;
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use photo_kiosk_core::CurrencyCode;

    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_current_bootstraps_defaults() {
        let pool = memory_pool().await;
        let service = SettingsService::new(pool);

        let settings = service.current().await.unwrap();
        assert_eq!(settings.store_name, "Photo Kiosk");
    }

    #[tokio::test]
    async fn test_update_is_visible_immediately() {
        let pool = memory_pool().await;
        let service = SettingsService::new(pool);

        // Warm the cache, then update through the service.
        service.current().await.unwrap();
        let patch = SettingsPatch {
            currency: Some(CurrencyCode::EUR),
            ..SettingsPatch::default()
        };
        service.update(patch).await.unwrap();

        // Invalidation means the next read sees the new value, not the TTL'd copy.
        let settings = service.current().await.unwrap();
        assert_eq!(settings.currency, CurrencyCode::EUR);
    }
}
