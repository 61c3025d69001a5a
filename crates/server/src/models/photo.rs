//! Uploaded photo model.
//!
//! Rows hold metadata only; the bytes live in the upload directory under
//! `file_key`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use photo_kiosk_core::{PhotoId, SessionId};

/// Metadata for one uploaded photo.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Photo {
    pub photo_id: PhotoId,
    pub session_id: SessionId,
    /// Storage name in the upload directory (uuid hex + extension).
    pub file_key: String,
    /// Sanitized client-supplied file name, kept for display.
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Public URL path where the stored photo is served.
    #[must_use]
    pub fn url_path(&self) -> String {
        format!("/api/uploads/{}", self.file_key)
    }
}
