//! Ticket workflow engine.
//!
//! Owns the [`TicketRepo`] and is its only writer. Every ticket handed back
//! to a caller is an owned clone, so nothing outside the service can reach
//! stored state.

use chrono::{Duration, Utc};
use serde::Serialize;

use recolour_core::catalog::{photo_catalog, STYLE_OPTIONS};
use recolour_core::error::StoreError;
use recolour_core::photo::PhotoOption;
use recolour_core::roles::Role;
use recolour_core::sorting::TicketSort;
use recolour_core::tracking::{detect_change, FieldChange, FieldValue, TrackedField, TRACKED_FIELDS};
use recolour_core::types::Timestamp;
use recolour_core::view_meta::{
    approved_meta, approved_meta_for_partner, partner_ticket_list_meta, queue_meta, ViewMeta,
};
use recolour_core::workflow::{
    actions_for, validate_transition, Priority, TicketStatus, WorkflowAction,
    PARTNER_VISIBLE_STATUSES, QUEUE_VISIBLE_STATUSES,
};
use recolour_db::models::ticket::{
    CreateTicket, HistoryEvent, Ticket, TicketFilters, TicketView, UpdateTicket,
};
use recolour_db::repositories::{RepoTicketFilters, TicketRepo};

/// `{ data, meta }` envelope returned by every list operation.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: ViewMeta,
}

/// Read-only snapshot used to populate ticket forms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaOptions {
    pub partners: Vec<String>,
    pub priorities: Vec<Priority>,
    pub style_options: Vec<String>,
    pub photo_options: Vec<PhotoOption>,
}

#[derive(Debug, Default)]
pub struct TicketService {
    repo: TicketRepo,
}

impl TicketService {
    pub fn new(repo: TicketRepo) -> Self {
        Self { repo }
    }

    /// Read access for reporting projections.
    pub fn repo(&self) -> &TicketRepo {
        &self.repo
    }

    // -- Creation -----------------------------------------------------------

    pub fn create(&mut self, input: CreateTicket, actor: &str) -> Ticket {
        let id = self.repo.generate_id();
        let ticket = Ticket::new(id, input, Utc::now(), actor);
        tracing::info!(
            ticket_id = %ticket.id,
            partner = %ticket.partner,
            priority = %ticket.priority,
            actor = %actor,
            "Ticket created"
        );
        self.repo.add(ticket.clone());
        ticket
    }

    /// Store demo tickets with createdAt spaced one millisecond apart from now.
    pub fn seed(&mut self, inputs: Vec<CreateTicket>, actor: &str) {
        self.seed_at(inputs, actor, Utc::now());
    }

    /// Store tickets with createdAt = `base` + index milliseconds so they
    /// sort deterministically.
    pub fn seed_at(&mut self, inputs: Vec<CreateTicket>, actor: &str, base: Timestamp) {
        let count = inputs.len();
        for (i, input) in inputs.into_iter().enumerate() {
            let id = self.repo.generate_id();
            let created_at = base + Duration::milliseconds(i as i64);
            self.repo.add(Ticket::new(id, input, created_at, actor));
        }
        tracing::info!(count, actor = %actor, "Seeded tickets");
    }

    // -- Reads --------------------------------------------------------------

    /// A single ticket with the caller's available actions.
    ///
    /// Partners only see their own tickets, and never while Pending.
    pub fn find_by_id(&self, id: &str, role: &Role) -> Option<TicketView> {
        let ticket = self.repo.get_by_id(id)?;
        if let Role::Partner(name) = role {
            if &ticket.partner != name || ticket.status == TicketStatus::Pending {
                return None;
            }
        }
        Some(with_actions(ticket, role))
    }

    /// Queue for managers/operators; owned, partner-visible tickets for a
    /// partner.
    pub fn list(
        &self,
        filters: TicketFilters,
        sort: &TicketSort,
        role: &Role,
    ) -> ListResponse<TicketView> {
        match role {
            Role::Partner(name) => {
                let filters =
                    RepoTicketFilters::from(filters).with_status_in(PARTNER_VISIBLE_STATUSES);
                let data = self
                    .repo
                    .list_for_partner(name, filters, sort)
                    .into_iter()
                    .map(|t| with_actions(t, role))
                    .collect();
                ListResponse {
                    data,
                    meta: partner_ticket_list_meta(),
                }
            }
            Role::Manager | Role::Operator => {
                let filters =
                    RepoTicketFilters::from(filters).with_status_in(QUEUE_VISIBLE_STATUSES);
                let data = self
                    .repo
                    .list(&filters, sort)
                    .into_iter()
                    .map(|t| with_actions(t, role))
                    .collect();
                ListResponse {
                    data,
                    meta: queue_meta(&self.repo.distinct_partners()),
                }
            }
        }
    }

    /// The approved library, scoped to the partner for partner roles.
    pub fn list_approved(&self, role: &Role) -> ListResponse<TicketView> {
        match role.partner_name() {
            Some(partner) => self.list_approved_for_partner(partner),
            None => ListResponse {
                data: self.approved_views(RepoTicketFilters::status(TicketStatus::Approved)),
                meta: approved_meta(),
            },
        }
    }

    pub fn list_approved_for_partner(&self, partner: &str) -> ListResponse<TicketView> {
        let filters =
            RepoTicketFilters::status(TicketStatus::Approved).with_partner_scope(partner);
        ListResponse {
            data: self.approved_views(filters),
            meta: approved_meta_for_partner(),
        }
    }

    fn approved_views(&self, filters: RepoTicketFilters) -> Vec<TicketView> {
        self.repo
            .list(&filters, &TicketSort::default())
            .into_iter()
            .map(|ticket| TicketView {
                ticket: ticket.clone(),
                available_actions: None,
                approved_date: ticket.approved_date(),
            })
            .collect()
    }

    pub fn meta_options(&self) -> MetaOptions {
        MetaOptions {
            partners: self.repo.distinct_partners(),
            priorities: Priority::ALL.to_vec(),
            style_options: STYLE_OPTIONS.iter().map(|s| (*s).to_string()).collect(),
            photo_options: photo_catalog(),
        }
    }

    // -- Mutations ----------------------------------------------------------

    /// Apply the provided fields and record one `Edited` event per field that
    /// actually changed, in tracked-field order. A no-op update leaves
    /// `updatedAt` and history untouched.
    pub fn update(
        &mut self,
        id: &str,
        input: UpdateTicket,
        actor: &str,
    ) -> Result<Ticket, StoreError> {
        let ticket = self
            .repo
            .get_by_id_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let changes = apply_changes(ticket, input);
        if !changes.is_empty() {
            let now = Utc::now();
            ticket.updated_at = now;
            let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
            tracing::info!(
                ticket_id = %id,
                actor = %actor,
                fields = ?fields,
                "Ticket edited"
            );
            let status = ticket.status;
            ticket.history.extend(
                changes
                    .into_iter()
                    .map(|change| HistoryEvent::edited(status, actor, change, now)),
            );
        }

        Ok(ticket.clone())
    }

    /// Move a ticket to `to` if the edge is legal.
    ///
    /// Purely structural: role permission is checked by the caller before
    /// this is invoked.
    pub fn change_status(
        &mut self,
        id: &str,
        to: TicketStatus,
        actor: &str,
        reason: Option<String>,
    ) -> Result<Ticket, StoreError> {
        let ticket = self
            .repo
            .get_by_id_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let from = ticket.status;
        if let Err(err) = validate_transition(from, to) {
            tracing::warn!(
                ticket_id = %id,
                from = %from,
                to = %to,
                actor = %actor,
                "Rejected status transition"
            );
            return Err(err);
        }

        let now = Utc::now();
        ticket.status = to;
        ticket.updated_at = now;
        ticket
            .history
            .push(HistoryEvent::status_changed(from, to, actor, reason, now));

        tracing::info!(
            ticket_id = %id,
            from = %from,
            to = %to,
            actor = %actor,
            "Ticket status changed"
        );
        Ok(ticket.clone())
    }
}

/// Actions `role` may invoke on `ticket` right now, in transition-table order.
pub fn available_actions(ticket: &Ticket, role: &Role) -> Vec<WorkflowAction> {
    actions_for(ticket.status, role.kind())
}

fn with_actions(ticket: &Ticket, role: &Role) -> TicketView {
    TicketView {
        ticket: ticket.clone(),
        available_actions: Some(available_actions(ticket, role)),
        approved_date: None,
    }
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

/// Compare one provided field against its stored value and overwrite it when
/// the rendered forms differ.
fn track<T>(
    field: TrackedField,
    current: &mut T,
    new: Option<T>,
    view: impl Fn(&T) -> FieldValue<'_>,
) -> Option<FieldChange> {
    let new = new?;
    let change = detect_change(field, view(&*current), view(&new))?;
    *current = new;
    Some(change)
}

fn apply_changes(ticket: &mut Ticket, input: UpdateTicket) -> Vec<FieldChange> {
    let UpdateTicket {
        mut style,
        mut priority,
        mut partner,
        mut instructions,
        mut reference_photos,
        mut partner_photos,
    } = input;

    let mut changes = Vec::new();
    for (field, _) in TRACKED_FIELDS {
        let change = match field {
            TrackedField::Style => track(*field, &mut ticket.style, style.take(), |s: &String| {
                FieldValue::Text(s.as_str())
            }),
            TrackedField::Priority => track(
                *field,
                &mut ticket.priority,
                priority.take(),
                |p: &Priority| FieldValue::Text(p.as_str()),
            ),
            TrackedField::Partner => track(
                *field,
                &mut ticket.partner,
                partner.take(),
                |s: &String| FieldValue::Text(s.as_str()),
            ),
            TrackedField::Instructions => track(
                *field,
                &mut ticket.instructions,
                instructions.take(),
                |v: &Vec<String>| FieldValue::List(v.as_slice()),
            ),
            TrackedField::ReferencePhotos => track(
                *field,
                &mut ticket.reference_photos,
                reference_photos.take(),
                |v: &Vec<PhotoOption>| FieldValue::Photos(v.as_slice()),
            ),
            TrackedField::PartnerPhotos => track(
                *field,
                &mut ticket.partner_photos,
                partner_photos.take(),
                |v: &Vec<PhotoOption>| FieldValue::Photos(v.as_slice()),
            ),
        };
        changes.extend(change);
    }
    changes
}
