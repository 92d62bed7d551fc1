//! Route definitions for read-only projections.

use axum::routing::get;
use axum::Router;

use crate::handlers::views;
use crate::state::AppState;

/// ```text
/// GET    /meta/options         meta_options (public)
/// GET    /approved             list_approved
/// GET    /partners/overview    partner_overview (manager, operator)
/// GET    /dashboard/stats      get_dashboard_stats (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meta/options", get(views::meta_options))
        .route("/approved", get(views::list_approved))
        .route("/partners/overview", get(views::partner_overview))
        .route("/dashboard/stats", get(views::get_dashboard_stats))
}
