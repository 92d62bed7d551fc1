//! Recolour ticket entity, its history log, and request DTOs.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use recolour_core::photo::PhotoOption;
use recolour_core::tracking::{FieldChange, TrackedField};
use recolour_core::types::{TicketId, Timestamp};
use recolour_core::workflow::{Priority, TicketStatus, WorkflowAction};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEventType {
    Created,
    Edited,
    StatusChanged,
}

/// An immutable audit record appended to a ticket's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    #[serde(rename = "type")]
    pub kind: HistoryEventType,
    pub from_status: Option<TicketStatus>,
    pub to_status: Option<TicketStatus>,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<TrackedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl HistoryEvent {
    pub fn created(actor: &str, at: Timestamp) -> Self {
        Self {
            kind: HistoryEventType::Created,
            from_status: None,
            to_status: Some(TicketStatus::Pending),
            actor: actor.to_string(),
            reason: None,
            at,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// One edited field. Status is unchanged by edits, so both snapshots
    /// carry the current status.
    pub fn edited(status: TicketStatus, actor: &str, change: FieldChange, at: Timestamp) -> Self {
        Self {
            kind: HistoryEventType::Edited,
            from_status: Some(status),
            to_status: Some(status),
            actor: actor.to_string(),
            reason: None,
            at,
            field: Some(change.field),
            old_value: Some(change.old_value),
            new_value: Some(change.new_value),
        }
    }

    pub fn status_changed(
        from: TicketStatus,
        to: TicketStatus,
        actor: &str,
        reason: Option<String>,
        at: Timestamp,
    ) -> Self {
        Self {
            kind: HistoryEventType::StatusChanged,
            from_status: Some(from),
            to_status: Some(to),
            actor: actor.to_string(),
            reason,
            at,
            field: None,
            old_value: None,
            new_value: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A unit of recolour work as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub style: String,
    pub priority: Priority,
    pub partner: String,
    pub instructions: Vec<String>,
    pub reference_photos: Vec<PhotoOption>,
    pub partner_photos: Vec<PhotoOption>,
    pub status: TicketStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub history: Vec<HistoryEvent>,
}

impl Ticket {
    /// Build a new Pending ticket with its single `Created` history entry.
    pub fn new(id: TicketId, input: CreateTicket, created_at: Timestamp, actor: &str) -> Self {
        Self {
            id,
            style: input.style,
            priority: input.priority,
            partner: input.partner,
            instructions: input.instructions,
            reference_photos: input.reference_photos.unwrap_or_default(),
            partner_photos: Vec::new(),
            status: TicketStatus::Pending,
            created_at,
            updated_at: created_at,
            history: vec![HistoryEvent::created(actor, created_at)],
        }
    }

    /// Timestamp of the most recent transition into `Approved`.
    pub fn approved_date(&self) -> Option<Timestamp> {
        self.history
            .iter()
            .rev()
            .find(|e| {
                e.kind == HistoryEventType::StatusChanged
                    && e.to_status == Some(TicketStatus::Approved)
            })
            .map(|e| e.at)
    }
}

/// A ticket plus the per-request fields derived for the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_actions: Option<Vec<WorkflowAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

fn entries_not_blank(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(ValidationError::new("empty_entry"));
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// DTO for creating a ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    #[validate(length(min = 1))]
    pub style: String,
    pub priority: Priority,
    #[validate(length(min = 1))]
    pub partner: String,
    #[validate(length(min = 1), custom(function = "entries_not_blank"))]
    pub instructions: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub reference_photos: Option<Vec<PhotoOption>>,
}

/// DTO for editing a ticket. `None` means "not provided".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "at_least_one_field"))]
pub struct UpdateTicket {
    #[validate(length(min = 1))]
    pub style: Option<String>,
    pub priority: Option<Priority>,
    #[validate(length(min = 1))]
    pub partner: Option<String>,
    #[validate(length(min = 1), custom(function = "entries_not_blank"))]
    pub instructions: Option<Vec<String>>,
    #[validate(length(min = 1), nested)]
    pub reference_photos: Option<Vec<PhotoOption>>,
    #[validate(nested)]
    pub partner_photos: Option<Vec<PhotoOption>>,
}

impl UpdateTicket {
    pub fn is_empty(&self) -> bool {
        self.style.is_none()
            && self.priority.is_none()
            && self.partner.is_none()
            && self.instructions.is_none()
            && self.reference_photos.is_none()
            && self.partner_photos.is_none()
    }

    /// Update carrying only a new partner photo list.
    pub fn partner_photos(photos: Vec<PhotoOption>) -> Self {
        Self {
            partner_photos: Some(photos),
            ..Self::default()
        }
    }
}

fn at_least_one_field(input: &UpdateTicket) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::new("at_least_one_field"));
    }
    Ok(())
}

/// Request body for the reject action.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectRequest {
    #[validate(custom(function = "not_blank"))]
    pub reason: String,
}

/// Base64 photo upload. The thumbnail is generated client-side.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadRequest {
    #[validate(length(min = 1))]
    pub image_data: String,
    #[validate(length(min = 1))]
    pub thumbnail_data: String,
    #[validate(length(min = 1))]
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// User-facing list filters. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub partner: Option<String>,
}
