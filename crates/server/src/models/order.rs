//! Order model.
//!
//! An order is a priced snapshot of a session's photos. Store name, currency,
//! unit price, and receipt footer are copied from the settings at creation
//! time so the receipt never changes after the fact.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use photo_kiosk_core::{CurrencyCode, OrderNumber, OrderStatus, Price, SessionId};

/// A receipt-ready order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub order_number: OrderNumber,
    pub session_id: SessionId,
    pub photo_count: i64,
    pub currency: CurrencyCode,
    pub price_per_photo_cents: i64,
    pub total_cents: i64,
    pub store_name: String,
    pub receipt_footer: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub printed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Unit price as a decimal amount.
    #[must_use]
    pub fn price_per_photo(&self) -> Price {
        Price::from_cents(self.price_per_photo_cents, self.currency)
    }

    /// Order total as a decimal amount.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::from_cents(self.total_cents, self.currency)
    }
}
