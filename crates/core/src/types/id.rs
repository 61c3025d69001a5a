//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Kiosk entity IDs are
//! opaque strings (UUID v4 hex) so they can appear directly in URLs and QR
//! codes without escaping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `generate()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
/// - `sqlx` `Type` implementation (with `sqlite` feature)
///
/// # Example
///
/// ```rust
/// # use photo_kiosk_core::define_id;
/// define_id!(SessionId);
/// define_id!(PhotoId);
///
/// let session_id = SessionId::generate();
/// let photo_id = PhotoId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: SessionId = photo_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "sqlite", derive(::sqlx::Type))]
        #[cfg_attr(feature = "sqlite", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random ID (UUID v4, lowercase hex, no hyphens).
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4().simple().to_string())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(SessionId);
define_id!(PhotoId);

/// Prefix for receipt order numbers.
const ORDER_NUMBER_PREFIX: &str = "PK";

/// Human-readable order number printed on receipts.
///
/// Format: `PK-{YYYYMMDDHHMMSS}-{6 uppercase hex}`, e.g.
/// `PK-20260314153000-A1B2C3`. The timestamp component keeps receipts
/// roughly sortable at the counter; the random suffix makes collisions
/// within a second a non-issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(transparent))]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Wrap an existing order number string.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Generate a fresh order number stamped with the given time.
    #[must_use]
    pub fn generate_at(now: DateTime<Utc>) -> Self {
        let stamp = now.format("%Y%m%d%H%M%S");
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase();
        Self(format!("{ORDER_NUMBER_PREFIX}-{stamp}-{suffix}"))
    }

    /// Generate a fresh order number stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Get the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(number: String) -> Self {
        Self(number)
    }
}

impl From<&str> for OrderNumber {
    fn from(number: &str) -> Self {
        Self(number.to_owned())
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_generated_ids_are_hex_and_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!a.as_str().contains('-'));
    }

    #[test]
    fn test_ids_are_distinct_types() {
        let session_id = SessionId::new("abc");
        let photo_id = PhotoId::new("abc");

        // Same underlying value, different types; compare via as_str only.
        assert_eq!(session_id.as_str(), photo_id.as_str());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = SessionId::new("deadbeef");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deadbeef\"");

        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_order_number_format() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap();
        let number = OrderNumber::generate_at(now);
        let s = number.as_str();

        let mut parts = s.splitn(3, '-');
        assert_eq!(parts.next(), Some("PK"));
        assert_eq!(parts.next(), Some("20260314153000"));

        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_order_numbers_are_unique() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap();
        assert_ne!(
            OrderNumber::generate_at(now),
            OrderNumber::generate_at(now)
        );
    }
}
