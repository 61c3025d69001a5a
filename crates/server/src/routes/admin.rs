//! Admin PIN verification.
//!
//! The admin screen is gated client-side; this endpoint is the check behind
//! it. A wrong PIN is a normal 200 with `ok: false`, not an auth failure.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// PIN entered on the admin screen.
#[derive(Debug, Deserialize)]
pub struct VerifyPinRequest {
    pub pin: String,
}

/// Verification outcome.
#[derive(Debug, Serialize)]
pub struct VerifyPinResponse {
    pub ok: bool,
}

/// Check a candidate PIN against the stored one.
pub async fn verify_pin(
    State(state): State<AppState>,
    Json(body): Json<VerifyPinRequest>,
) -> Result<Json<VerifyPinResponse>> {
    let settings = state.settings().current().await?;
    let ok = settings.admin_pin.verify(&body.pin);

    if !ok {
        tracing::warn!("admin PIN verification failed");
    }

    Ok(Json(VerifyPinResponse { ok }))
}
