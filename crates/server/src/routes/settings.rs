//! Settings route handlers.
//!
//! The admin screen reads and writes the store settings singleton. The PIN
//! is accepted on update but never echoed back.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use photo_kiosk_core::{AdminPin, CurrencyCode, Price};

use crate::db::SettingsPatch;
use crate::error::{AppError, Result};
use crate::models::StoreSettings;
use crate::state::AppState;

/// Public settings view; the admin PIN is deliberately absent.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub store_name: String,
    pub currency: CurrencyCode,
    pub price_per_photo: Decimal,
    pub receipt_footer: String,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreSettings> for SettingsResponse {
    fn from(settings: StoreSettings) -> Self {
        Self {
            price_per_photo: settings.price_per_photo().amount(),
            store_name: settings.store_name,
            currency: settings.currency,
            receipt_footer: settings.receipt_footer,
            updated_at: settings.updated_at,
        }
    }
}

/// Partial settings update from the admin screen.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsUpdateRequest {
    pub store_name: Option<String>,
    pub currency: Option<CurrencyCode>,
    pub price_per_photo: Option<Decimal>,
    pub receipt_footer: Option<String>,
    pub admin_pin: Option<String>,
}

/// Current public settings.
pub async fn show(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let settings = state.settings().current().await?;
    Ok(Json(SettingsResponse::from(settings)))
}

/// Apply a partial settings update.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<SettingsUpdateRequest>,
) -> Result<Json<SettingsResponse>> {
    let current = state.settings().current().await?;
    let currency = body.currency.unwrap_or(current.currency);

    let price_per_photo_cents = body
        .price_per_photo
        .map(|price| {
            if price.is_sign_negative() {
                return Err(AppError::BadRequest(
                    "price_per_photo must not be negative".to_owned(),
                ));
            }
            Price::new(price, currency)
                .to_cents()
                .ok_or_else(|| AppError::BadRequest("price_per_photo out of range".to_owned()))
        })
        .transpose()?;

    let admin_pin = body
        .admin_pin
        .as_deref()
        .map(|pin| AdminPin::parse(pin).map_err(|e| AppError::BadRequest(e.to_string())))
        .transpose()?;

    let patch = SettingsPatch {
        store_name: body.store_name,
        currency: body.currency,
        price_per_photo_cents,
        receipt_footer: body.receipt_footer,
        admin_pin,
    };

    let updated = state.settings().update(patch).await?;
    tracing::info!("store settings updated");

    Ok(Json(SettingsResponse::from(updated)))
}
