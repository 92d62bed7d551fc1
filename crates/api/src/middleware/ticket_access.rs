//! Ticket-level gate shared by the partner photo routes.

use recolour_core::error::CoreError;
use recolour_core::roles::Role;
use recolour_core::workflow::TicketStatus;
use recolour_db::models::ticket::Ticket;
use recolour_engine::TicketService;

use crate::error::{AppError, AppResult};

pub const MSG_PHOTOS_REQUIRE_IN_PROGRESS: &str =
    "Photos can only be managed when ticket is In Progress";

/// Resolve a ticket the partner may manage photos on.
///
/// The ticket must be visible to the partner (404 otherwise) and currently
/// In Progress (409 otherwise).
pub fn require_photo_access(
    tickets: &TicketService,
    ticket_id: &str,
    partner: &str,
) -> AppResult<Ticket> {
    let view = tickets
        .find_by_id(ticket_id, &Role::Partner(partner.to_string()))
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Ticket",
                id: ticket_id.to_string(),
            })
        })?;

    if view.ticket.status != TicketStatus::InProgress {
        return Err(AppError::Core(CoreError::Conflict(
            MSG_PHOTOS_REQUIRE_IN_PROGRESS.into(),
        )));
    }

    Ok(view.ticket)
}
