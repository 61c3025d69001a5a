//! Photo repository.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use photo_kiosk_core::{OrderNumber, PhotoId, SessionId};

use super::RepositoryError;
use crate::models::Photo;

const PHOTO_COLUMNS: &str =
    "photo_id, session_id, file_key, file_name, mime_type, size_bytes, created_at";

/// Repository for uploaded photo metadata.
pub struct PhotoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PhotoRepository<'a> {
    /// Create a new photo repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a photo record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the file key already exists,
    /// `RepositoryError::Database` for other failures.
    pub async fn insert(&self, photo: &Photo) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO photos \
             (photo_id, session_id, file_key, file_name, mime_type, size_bytes, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&photo.photo_id)
        .bind(&photo.session_id)
        .bind(&photo.file_key)
        .bind(&photo.file_name)
        .bind(&photo.mime_type)
        .bind(photo.size_bytes)
        .bind(photo.created_at)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("duplicate file key: {}", photo.file_key)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// All photos in a session, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Photo>, RepositoryError> {
        let photos = sqlx::query_as::<_, Photo>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos \
             WHERE session_id = ?1 ORDER BY created_at, photo_id",
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(photos)
    }

    /// The subset of a session's photos matching `photo_ids`, oldest first.
    ///
    /// IDs not belonging to the session are silently skipped, so a stale
    /// kiosk selection cannot pull in another session's photos.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_selected(
        &self,
        session_id: &SessionId,
        photo_ids: &[PhotoId],
    ) -> Result<Vec<Photo>, RepositoryError> {
        if photo_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE session_id = "
        ));
        qb.push_bind(session_id.as_str());
        qb.push(" AND photo_id IN (");
        {
            let mut separated = qb.separated(", ");
            for id in photo_ids {
                separated.push_bind(id.as_str());
            }
        }
        qb.push(") ORDER BY created_at, photo_id");

        let photos = qb
            .build_query_as::<Photo>()
            .fetch_all(self.pool)
            .await?;

        Ok(photos)
    }

    /// Photos belonging to an order, in the order they were snapshotted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_order(
        &self,
        order_number: &OrderNumber,
    ) -> Result<Vec<Photo>, RepositoryError> {
        let photos = sqlx::query_as::<_, Photo>(&format!(
            "SELECT p.photo_id, p.session_id, p.file_key, p.file_name, p.mime_type, \
                    p.size_bytes, p.created_at \
             FROM photos p \
             JOIN order_photos op ON op.photo_id = p.photo_id \
             WHERE op.order_number = ?1 \
             ORDER BY op.position",
        ))
        .bind(order_number)
        .fetch_all(self.pool)
        .await?;

        Ok(photos)
    }
}
