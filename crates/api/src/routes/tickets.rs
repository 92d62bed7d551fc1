//! Route definitions for tickets and their workflow transitions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes, nested under `/tickets`.
///
/// ```text
/// GET    /                 list_tickets
/// POST   /                 create_ticket
/// GET    /{id}             get_ticket
/// PUT    /{id}             update_ticket
/// POST   /{id}/send        send_ticket
/// POST   /{id}/receipt     confirm_receipt
/// POST   /{id}/start       start_work
/// POST   /{id}/complete    complete_work
/// POST   /{id}/approve     approve_ticket
/// POST   /{id}/reject      reject_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route("/{id}", get(tickets::get_ticket).put(tickets::update_ticket))
        .route("/{id}/send", post(tickets::send_ticket))
        .route("/{id}/receipt", post(tickets::confirm_receipt))
        .route("/{id}/start", post(tickets::start_work))
        .route("/{id}/complete", post(tickets::complete_work))
        .route("/{id}/approve", post(tickets::approve_ticket))
        .route("/{id}/reject", post(tickets::reject_ticket))
}
