//! Read-only projections: form options, approved library, partner overview
//! and the manager dashboard.

use axum::extract::State;
use axum::Json;

use recolour_db::models::ticket::TicketView;
use recolour_engine::dashboard::{
    dashboard_stats, partner_overview_response, DashboardStats, PartnerOverviewRow,
};
use recolour_engine::{ListResponse, MetaOptions};

use crate::error::AppResult;
use crate::middleware::auth::AuthRole;
use crate::middleware::rbac::{RequireManager, RequireStaff};
use crate::state::AppState;

/// GET /api/meta/options
///
/// Partners, priorities, style options and the photo catalog. No auth.
pub async fn meta_options(State(state): State<AppState>) -> Json<MetaOptions> {
    Json(state.tickets.read().await.meta_options())
}

/// GET /api/approved
///
/// Approved tickets with their approval date. Partners only see their own.
pub async fn list_approved(
    AuthRole(role): AuthRole,
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<TicketView>>> {
    Ok(Json(state.tickets.read().await.list_approved(&role)))
}

/// GET /api/partners/overview
pub async fn partner_overview(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<PartnerOverviewRow>>> {
    let tickets = state.tickets.read().await;
    Ok(Json(partner_overview_response(tickets.repo())))
}

/// GET /api/dashboard/stats
pub async fn get_dashboard_stats(
    _manager: RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let tickets = state.tickets.read().await;
    Ok(Json(dashboard_stats(tickets.repo())))
}
