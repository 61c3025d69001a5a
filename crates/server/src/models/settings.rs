//! Store settings model (singleton).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use photo_kiosk_core::{AdminPin, CurrencyCode, Price};

/// Store configuration: one global row, bootstrapped with defaults on first
/// access.
///
/// Not `Serialize` on purpose; API responses go through a DTO that omits
/// `admin_pin`.
#[derive(Debug, Clone, FromRow)]
pub struct StoreSettings {
    pub store_name: String,
    pub currency: CurrencyCode,
    pub price_per_photo_cents: i64,
    pub receipt_footer: String,
    pub admin_pin: AdminPin,
    pub updated_at: DateTime<Utc>,
}

impl StoreSettings {
    /// Factory defaults installed on first access.
    #[must_use]
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            store_name: "Photo Kiosk".to_owned(),
            currency: CurrencyCode::USD,
            price_per_photo_cents: 250,
            receipt_footer: "Take this receipt to the counter to pay.".to_owned(),
            admin_pin: AdminPin::default(),
            updated_at: now,
        }
    }

    /// Unit price as a decimal amount.
    #[must_use]
    pub fn price_per_photo(&self) -> Price {
        Price::from_cents(self.price_per_photo_cents, self.currency)
    }
}
