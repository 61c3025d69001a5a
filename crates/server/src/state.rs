//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::KioskConfig;
use crate::services::{SettingsService, UploadStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, upload store, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: KioskConfig,
    pool: SqlitePool,
    uploads: UploadStore,
    settings: SettingsService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The upload store points at `config.upload_dir`; callers must ensure
    /// the directory exists before serving traffic.
    #[must_use]
    pub fn new(config: KioskConfig, pool: SqlitePool) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone());
        let settings = SettingsService::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
                settings,
            }),
        }
    }

    /// Get a reference to the kiosk configuration.
    #[must_use]
    pub fn config(&self) -> &KioskConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the upload store.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    /// Get a reference to the cached settings service.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }
}
