//! Handlers for partner photo upload and removal.
//!
//! Both routes hold the ticket write lock from the access check until the
//! ticket's photo list has been rewritten, so two uploads to the same ticket
//! cannot drop each other's photo.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use recolour_db::models::ticket::{PhotoUploadRequest, UpdateTicket};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequirePartner;
use crate::middleware::ticket_access::require_photo_access;
use crate::state::AppState;

pub const MSG_PHOTO_NOT_FOUND: &str = "Photo not found on this ticket";

fn decode(data: &str) -> AppResult<Vec<u8>> {
    STANDARD.decode(data.trim()).map_err(|e| {
        tracing::debug!(error = %e, "Photo payload is not valid base64");
        AppError::InvalidPayload
    })
}

/// POST /api/tickets/{id}/photos
///
/// Store a base64 encoded photo and its thumbnail, then append it to the
/// ticket's partner photos. Partner only, ticket must be In Progress.
pub async fn upload_photo(
    RequirePartner(partner): RequirePartner,
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    payload: Result<ValidatedJson<PhotoUploadRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    let mut tickets = state.tickets.write().await;
    let ticket = require_photo_access(&tickets, &ticket_id, &partner)?;

    let ValidatedJson(input) = payload?;
    let image = decode(&input.image_data)?;
    let thumbnail = decode(&input.thumbnail_data)?;

    let photo = state
        .photos
        .upload(&ticket.id, &image, &thumbnail, &input.file_name)
        .await?;

    let mut photos = ticket.partner_photos;
    photos.push(photo.clone());
    tickets.update(&ticket.id, UpdateTicket::partner_photos(photos), &partner)?;

    tracing::info!(
        ticket_id = %ticket.id,
        photo_id = %photo.id,
        partner = %partner,
        "Partner photo uploaded"
    );

    Ok((StatusCode::CREATED, Json(photo)))
}

/// DELETE /api/tickets/{id}/photos/{photo_id}
///
/// Remove a partner photo from the ticket and delete its files.
pub async fn delete_photo(
    RequirePartner(partner): RequirePartner,
    State(state): State<AppState>,
    Path((ticket_id, photo_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let mut tickets = state.tickets.write().await;
    let ticket = require_photo_access(&tickets, &ticket_id, &partner)?;

    let Some(photo) = ticket.partner_photos.iter().find(|p| p.id == photo_id) else {
        return Err(AppError::NotFound(MSG_PHOTO_NOT_FOUND.into()));
    };

    state
        .photos
        .delete_files(&ticket.id, &photo.file_name)
        .await;

    let remaining = ticket
        .partner_photos
        .iter()
        .filter(|p| p.id != photo_id)
        .cloned()
        .collect();
    tickets.update(&ticket.id, UpdateTicket::partner_photos(remaining), &partner)?;

    tracing::info!(
        ticket_id = %ticket.id,
        photo_id = %photo_id,
        partner = %partner,
        "Partner photo deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
