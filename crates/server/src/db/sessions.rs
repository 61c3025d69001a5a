//! Session repository.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use photo_kiosk_core::{SessionId, SessionStatus};

use super::RepositoryError;
use crate::models::Session;
use crate::models::session::SESSION_TTL_HOURS;

/// Repository for upload session database operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a fresh session expiring [`SESSION_TTL_HOURS`] from `now`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, now: DateTime<Utc>) -> Result<Session, RepositoryError> {
        let session = Session {
            session_id: SessionId::generate(),
            status: SessionStatus::Active,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        };

        sqlx::query(
            "INSERT INTO sessions (session_id, status, created_at, expires_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&session.session_id)
        .bind(session.status)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(self.pool)
        .await?;

        Ok(session)
    }

    /// Fetch a session by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT session_id, status, created_at, expires_at \
             FROM sessions WHERE session_id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = memory_pool().await;
        let repo = SessionRepository::new(&pool);

        let now = Utc::now();
        let created = repo.create(now).await.unwrap();
        assert_eq!(created.status, SessionStatus::Active);
        assert_eq!(created.expires_at, now + Duration::hours(SESSION_TTL_HOURS));

        let fetched = repo.get(&created.session_id).await.unwrap().unwrap();
        assert_eq!(fetched.session_id, created.session_id);
        assert_eq!(fetched.status, SessionStatus::Active);
        assert_eq!(fetched.expires_at, created.expires_at);
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_none() {
        let pool = memory_pool().await;
        let repo = SessionRepository::new(&pool);

        let missing = repo.get(&SessionId::new("nope")).await.unwrap();
        assert!(missing.is_none());
    }
}
