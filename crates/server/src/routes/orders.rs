//! Order route handlers.
//!
//! An order freezes a session's photos and the store's pricing into a
//! receipt. The print view fetches it, the browser prints it, and the
//! `afterprint` event marks it printed.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use photo_kiosk_core::{CurrencyCode, OrderNumber, OrderStatus, PhotoId, SessionId};

use crate::db::{OrderRepository, PhotoRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{Order, Photo};
use crate::routes::sessions::{PhotoResponse, load_active_session};
use crate::state::AppState;

/// Body for order creation; omit `selected_photo_ids` to print everything.
#[derive(Debug, Default, Deserialize)]
pub struct OrderCreateRequest {
    pub selected_photo_ids: Option<Vec<PhotoId>>,
}

/// A receipt-ready order as returned by the API.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_number: OrderNumber,
    pub session_id: SessionId,
    pub photo_count: i64,
    pub currency: CurrencyCode,
    pub price_per_photo: Decimal,
    pub total_amount: Decimal,
    pub store_name: String,
    pub receipt_footer: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub printed_at: Option<DateTime<Utc>>,
    pub photos: Vec<PhotoResponse>,
}

impl OrderResponse {
    fn from_parts(order: Order, photos: Vec<Photo>) -> Self {
        Self {
            price_per_photo: order.price_per_photo().amount(),
            total_amount: order.total().amount(),
            order_number: order.order_number,
            session_id: order.session_id,
            photo_count: order.photo_count,
            currency: order.currency,
            store_name: order.store_name,
            receipt_footer: order.receipt_footer,
            status: order.status,
            created_at: order.created_at,
            printed_at: order.printed_at,
            photos: photos.into_iter().map(PhotoResponse::from).collect(),
        }
    }
}

/// Create an order from a session's photos at the current price.
///
/// Settings are snapshotted into the order row; changing the price later
/// never touches receipts already handed out.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    body: Option<Json<OrderCreateRequest>>,
) -> Result<Json<OrderResponse>> {
    let session = load_active_session(&state, &session_id).await?;
    let settings = state.settings().current().await?;

    let photo_repo = PhotoRepository::new(state.pool());
    let selected = body.and_then(|Json(b)| b.selected_photo_ids);
    let photos = match selected {
        Some(ids) => photo_repo.list_selected(&session.session_id, &ids).await?,
        None => photo_repo.list_for_session(&session.session_id).await?,
    };

    if photos.is_empty() {
        return Err(AppError::BadRequest("No photos to print".to_owned()));
    }

    let photo_count = i64::try_from(photos.len()).unwrap_or(i64::MAX);
    let total_cents = settings
        .price_per_photo_cents
        .checked_mul(photo_count)
        .ok_or_else(|| AppError::Internal("order total overflow".to_owned()))?;

    let order = Order {
        order_number: OrderNumber::generate(),
        session_id: session.session_id,
        photo_count,
        currency: settings.currency,
        price_per_photo_cents: settings.price_per_photo_cents,
        total_cents,
        store_name: settings.store_name,
        receipt_footer: settings.receipt_footer,
        status: OrderStatus::PendingPrint,
        created_at: Utc::now(),
        printed_at: None,
    };

    let photo_ids: Vec<PhotoId> = photos.iter().map(|p| p.photo_id.clone()).collect();
    OrderRepository::new(state.pool())
        .create(&order, &photo_ids)
        .await?;

    tracing::info!(
        order_number = %order.order_number,
        photo_count = order.photo_count,
        total_cents = order.total_cents,
        "order created"
    );

    Ok(Json(OrderResponse::from_parts(order, photos)))
}

/// Fetch an order for the print view.
pub async fn show(
    State(state): State<AppState>,
    Path(order_number): Path<OrderNumber>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get(&order_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    let photos = PhotoRepository::new(state.pool())
        .list_for_order(&order.order_number)
        .await?;

    Ok(Json(OrderResponse::from_parts(order, photos)))
}

/// `afterprint` callback: stamp the order printed.
#[instrument(skip(state))]
pub async fn mark_printed(
    State(state): State<AppState>,
    Path(order_number): Path<OrderNumber>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .mark_printed(&order_number, Utc::now())
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Order not found".to_owned()),
            other => AppError::Database(other),
        })?;

    let photos = PhotoRepository::new(state.pool())
        .list_for_order(&order.order_number)
        .await?;

    tracing::info!(order_number = %order.order_number, "order marked printed");

    Ok(Json(OrderResponse::from_parts(order, photos)))
}
