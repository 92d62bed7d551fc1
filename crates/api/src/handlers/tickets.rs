//! Handlers for ticket CRUD and the workflow transitions.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use recolour_core::error::CoreError;
use recolour_core::roles::Role;
use recolour_core::workflow::WorkflowAction;
use recolour_db::models::ticket::{CreateTicket, RejectRequest, Ticket, UpdateTicket};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthRole;
use crate::middleware::rbac::require_action;
use crate::query::ListTicketsQuery;
use crate::state::AppState;

fn ticket_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ticket",
        id: id.to_string(),
    })
}

/// GET /api/tickets
///
/// The manager/operator queue, or the caller's own tickets for a partner.
pub async fn list_tickets(
    AuthRole(role): AuthRole,
    State(state): State<AppState>,
    query: Result<Query<ListTicketsQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query.map_err(|_| AppError::InvalidQuery)?;
    let (filters, sort) = params.parse()?;
    let tickets = state.tickets.read().await;
    Ok(Json(tickets.list(filters, &sort, &role)))
}

/// GET /api/tickets/{id}
///
/// Tickets the caller may not see are reported as missing.
pub async fn get_ticket(
    AuthRole(role): AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tickets = state.tickets.read().await;
    let view = tickets
        .find_by_id(&id, &role)
        .ok_or_else(|| ticket_not_found(&id))?;
    Ok(Json(view))
}

/// POST /api/tickets
pub async fn create_ticket(
    AuthRole(role): AuthRole,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTicket>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .tickets
        .write()
        .await
        .create(input, &role.actor_label());
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets/{id}
///
/// Edit one or more fields. At least one field must be provided.
pub async fn update_ticket(
    AuthRole(role): AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTicket>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .tickets
        .write()
        .await
        .update(&id, input, &role.actor_label())?;
    Ok(Json(ticket))
}

async fn transition(
    state: &AppState,
    role: &Role,
    id: &str,
    action: WorkflowAction,
    reason: Option<String>,
) -> AppResult<Json<Ticket>> {
    let ticket = state.tickets.write().await.change_status(
        id,
        action.target_status(),
        &role.actor_label(),
        reason,
    )?;
    Ok(Json(ticket))
}

/// POST /api/tickets/{id}/send
///
/// Pending -> Sent. Manager or operator.
pub async fn send_ticket(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Send)?;
    transition(&state, &auth.0, &id, WorkflowAction::Send, None).await
}

/// POST /api/tickets/{id}/receipt
///
/// Sent -> Received. Partner.
pub async fn confirm_receipt(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Receive)?;
    transition(&state, &auth.0, &id, WorkflowAction::Receive, None).await
}

/// POST /api/tickets/{id}/start
///
/// Received -> In Progress. Partner.
pub async fn start_work(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Start)?;
    transition(&state, &auth.0, &id, WorkflowAction::Start, None).await
}

/// POST /api/tickets/{id}/complete
///
/// In Progress -> Completed. Partner.
pub async fn complete_work(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Complete)?;
    transition(&state, &auth.0, &id, WorkflowAction::Complete, None).await
}

/// POST /api/tickets/{id}/approve
///
/// Completed -> Approved. Manager.
pub async fn approve_ticket(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Approve)?;
    transition(&state, &auth.0, &id, WorkflowAction::Approve, None).await
}

/// POST /api/tickets/{id}/reject
///
/// Completed -> Pending with a reason. Manager. The role is checked before
/// the body is looked at.
pub async fn reject_ticket(
    auth: AuthRole,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<ValidatedJson<RejectRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    require_action(&auth.0, WorkflowAction::Reject)?;
    let ValidatedJson(input) = payload?;
    let reason = input.reason.trim().to_string();

    tracing::info!(ticket_id = %id, reason = %reason, "Rejecting ticket");
    transition(&state, &auth.0, &id, WorkflowAction::Reject, Some(reason)).await
}
