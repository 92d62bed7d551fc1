pub mod health;
pub mod photos;
pub mod tickets;
pub mod views;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /meta/options                          form options (public)
///
/// /tickets                               list, create
/// /tickets/{id}                          get, update
/// /tickets/{id}/send                     Pending -> Sent (manager, operator)
/// /tickets/{id}/receipt                  Sent -> Received (partner)
/// /tickets/{id}/start                    Received -> In Progress (partner)
/// /tickets/{id}/complete                 In Progress -> Completed (partner)
/// /tickets/{id}/approve                  Completed -> Approved (manager)
/// /tickets/{id}/reject                   Completed -> Pending (manager)
/// /tickets/{id}/photos                   upload (owning partner)
/// /tickets/{id}/photos/{photo_id}        delete (owning partner)
///
/// /approved                              approved library
/// /partners/overview                     per-partner counts (manager, operator)
/// /dashboard/stats                       KPI cards and breakdowns (manager)
///
/// /assets/*                              static files (mounted by the app router)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest(
            "/tickets",
            tickets::router().merge(photos::router(config.max_upload_bytes)),
        )
        .merge(views::router())
}
