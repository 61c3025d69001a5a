//! Upload session model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use photo_kiosk_core::{SessionId, SessionStatus};

/// How long a session accepts uploads after creation.
pub const SESSION_TTL_HOURS: i64 = 2;

/// An upload session created at the kiosk.
///
/// The QR code shown on the kiosk encodes the session's upload URL; phones
/// append photos to the session until an order is created or the session
/// expires.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry timestamp.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// The status as of `now`, regardless of what was persisted.
    ///
    /// Expiry is enforced lazily on access; no background job flips rows.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.is_expired_at(now) {
            SessionStatus::Expired
        } else {
            self.status
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            session_id: SessionId::generate(),
            status: SessionStatus::Active,
            created_at: expires_at - Duration::hours(SESSION_TTL_HOURS),
            expires_at,
        }
    }

    #[test]
    fn test_status_at_before_expiry() {
        let now = Utc::now();
        let session = session_expiring_at(now + Duration::minutes(1));

        assert!(!session.is_expired_at(now));
        assert_eq!(session.status_at(now), SessionStatus::Active);
    }

    #[test]
    fn test_status_at_after_expiry() {
        let now = Utc::now();
        let session = session_expiring_at(now - Duration::seconds(1));

        assert!(session.is_expired_at(now));
        assert_eq!(session.status_at(now), SessionStatus::Expired);
    }
}
