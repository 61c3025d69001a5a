//! Session route handlers.
//!
//! Sessions are the QR handshake between kiosk and phone: the kiosk creates
//! one and renders its upload URL as a QR code, the phone POSTs photos to it,
//! and the kiosk polls the session until the customer walks back.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use photo_kiosk_core::{PhotoId, SessionId, SessionStatus};

use crate::db::{PhotoRepository, SessionRepository};
use crate::error::{AppError, Result};
use crate::models::{Photo, Session};
use crate::services::UploadStore;
use crate::state::AppState;

/// Response for session creation; `upload_url` is what the kiosk encodes
/// into the QR code.
#[derive(Debug, Serialize)]
pub struct SessionCreateResponse {
    pub session_id: SessionId,
    pub upload_path: String,
    pub upload_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// One uploaded photo as returned by the API.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub photo_id: PhotoId,
    pub session_id: SessionId,
    pub file_key: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub url_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        let url_path = photo.url_path();
        Self {
            photo_id: photo.photo_id,
            session_id: photo.session_id,
            file_key: photo.file_key,
            file_name: photo.file_name,
            mime_type: photo.mime_type,
            size_bytes: photo.size_bytes,
            url_path,
            created_at: photo.created_at,
        }
    }
}

/// Session state the kiosk polls every 1.5 seconds.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub photos_count: usize,
    pub last_uploaded_at: Option<DateTime<Utc>>,
    pub photos: Vec<PhotoResponse>,
}

/// Fetch a session and reject missing or expired ones.
pub(crate) async fn load_active_session(
    state: &AppState,
    session_id: &SessionId,
) -> Result<Session> {
    let session = SessionRepository::new(state.pool())
        .get(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_owned()))?;

    if session.is_expired_at(Utc::now()) {
        return Err(AppError::Gone("Session expired".to_owned()));
    }

    Ok(session)
}

/// Create a fresh upload session.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<Json<SessionCreateResponse>> {
    let session = SessionRepository::new(state.pool())
        .create(Utc::now())
        .await?;

    let upload_path = format!("/upload/{}", session.session_id);
    let upload_url = state.config().absolute_url(&upload_path);

    tracing::info!(session_id = %session.session_id, "session created");

    Ok(Json(SessionCreateResponse {
        session_id: session.session_id,
        upload_path,
        upload_url,
        created_at: session.created_at,
        expires_at: session.expires_at,
    }))
}

/// Session state plus embedded photos.
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SessionResponse>> {
    let session = load_active_session(&state, &session_id).await?;

    let photos = PhotoRepository::new(state.pool())
        .list_for_session(&session.session_id)
        .await?;
    let last_uploaded_at = photos.last().map(|p| p.created_at);
    let photos: Vec<PhotoResponse> = photos.into_iter().map(PhotoResponse::from).collect();

    Ok(Json(SessionResponse {
        session_id: session.session_id.clone(),
        status: session.status_at(Utc::now()),
        created_at: session.created_at,
        expires_at: session.expires_at,
        photos_count: photos.len(),
        last_uploaded_at,
        photos,
    }))
}

/// Photo list only, oldest first.
pub async fn list_photos(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Vec<PhotoResponse>>> {
    let session = load_active_session(&state, &session_id).await?;

    let photos = PhotoRepository::new(state.pool())
        .list_for_session(&session.session_id)
        .await?;

    Ok(Json(photos.into_iter().map(PhotoResponse::from).collect()))
}

/// Multipart photo upload from the phone.
///
/// Each file field is streamed to the upload directory under a fresh storage
/// key, then recorded in the database. Fields without a file name (plain form
/// values) are skipped.
#[instrument(skip(state, multipart))]
pub async fn upload_photos(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    mut multipart: Multipart,
) -> Result<Json<Vec<PhotoResponse>>> {
    let session = load_active_session(&state, &session_id).await?;
    let repo = PhotoRepository::new(state.pool());

    let mut created = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
    {
        let Some(original_name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };

        let file_name = UploadStore::sanitize_file_name(&original_name);
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let extension = UploadStore::extension_for(&file_name, &mime_type);

        let mut sink = state.uploads().create(&extension).await?;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(format!("Upload interrupted: {e}")))?
        {
            sink.write_chunk(&chunk).await?;
        }
        let stored = sink.finish().await?;

        let photo = Photo {
            photo_id: PhotoId::generate(),
            session_id: session.session_id.clone(),
            file_key: stored.file_key,
            file_name,
            mime_type,
            size_bytes: stored.size_bytes,
            created_at: Utc::now(),
        };
        repo.insert(&photo).await?;

        tracing::info!(
            session_id = %session.session_id,
            photo_id = %photo.photo_id,
            size_bytes = photo.size_bytes,
            "photo stored"
        );

        created.push(PhotoResponse::from(photo));
    }

    if created.is_empty() {
        return Err(AppError::BadRequest("No files uploaded".to_owned()));
    }

    Ok(Json(created))
}
