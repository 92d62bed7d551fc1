//! Route definitions for partner photos, merged into `/tickets`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Photo routes. Only these carry the larger upload body limit.
///
/// ```text
/// POST   /{id}/photos               upload_photo
/// DELETE /{id}/photos/{photo_id}    delete_photo
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/{id}/photos", post(photos::upload_photo))
        .route("/{id}/photos/{photo_id}", delete(photos::delete_photo))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
