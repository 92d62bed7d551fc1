//! In-memory repository for recolour tickets.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use recolour_core::sorting::{compare_text, SortKey, TicketSort};
use recolour_core::workflow::{Priority, TicketStatus};

use crate::models::ticket::{Ticket, TicketFilters};

/// Store-level filters: the public [`TicketFilters`] plus access-control
/// scoping. Every present field is an independent AND predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoTicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub partner: Option<String>,
    /// Restrict to one partner for access control, independent of the
    /// user-supplied `partner` filter.
    pub partner_scope: Option<String>,
    /// Include only tickets whose status is in this set.
    pub status_in: Option<Vec<TicketStatus>>,
}

impl RepoTicketFilters {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_partner_scope(mut self, partner: impl Into<String>) -> Self {
        self.partner_scope = Some(partner.into());
        self
    }

    pub fn with_status_in(mut self, statuses: &[TicketStatus]) -> Self {
        self.status_in = Some(statuses.to_vec());
        self
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(scope) = &self.partner_scope {
            if &ticket.partner != scope {
                return false;
            }
        }
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if ticket.priority != priority {
                return false;
            }
        }
        if let Some(partner) = &self.partner {
            if &ticket.partner != partner {
                return false;
            }
        }
        if let Some(statuses) = &self.status_in {
            if !statuses.contains(&ticket.status) {
                return false;
            }
        }
        true
    }
}

impl From<TicketFilters> for RepoTicketFilters {
    fn from(filters: TicketFilters) -> Self {
        Self {
            status: filters.status,
            priority: filters.priority,
            partner: filters.partner,
            ..Self::default()
        }
    }
}

/// Ascending comparison of two tickets by `key`.
///
/// Ties fall back to createdAt and then id, so the order is total and a
/// descending list is always the exact reverse of the ascending one.
pub fn compare_by(key: SortKey, a: &Ticket, b: &Ticket) -> Ordering {
    let primary = match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::Partner => compare_text(&a.partner, &b.partner),
    };
    primary
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| compare_ids(&a.id, &b.id))
}

/// Counter ids compare numerically: shorter first, then lexically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Owns every ticket record. No business rules live here.
#[derive(Debug)]
pub struct TicketRepo {
    tickets: Vec<Ticket>,
    next_id: u64,
}

impl Default for TicketRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketRepo {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            next_id: 1,
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Tickets matching `filters`, ordered by `sort`. The stored collection
    /// keeps its insertion order.
    pub fn list(&self, filters: &RepoTicketFilters, sort: &TicketSort) -> Vec<&Ticket> {
        let mut result: Vec<&Ticket> = self.tickets.iter().filter(|t| filters.matches(t)).collect();
        result.sort_by(|a, b| sort.sort_order.apply(compare_by(sort.sort_by, a, b)));
        result
    }

    /// Like [`list`](Self::list), scoped to a single partner.
    pub fn list_for_partner(
        &self,
        partner: &str,
        filters: RepoTicketFilters,
        sort: &TicketSort,
    ) -> Vec<&Ticket> {
        self.list(&filters.with_partner_scope(partner), sort)
    }

    /// Every ticket in insertion order.
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Sorted, deduplicated partner names across all tickets.
    pub fn distinct_partners(&self) -> Vec<String> {
        self.tickets
            .iter()
            .map(|t| t.partner.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    // Companion of `len` for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    // -- Mutations ----------------------------------------------------------

    pub fn add(&mut self, ticket: Ticket) {
        tracing::debug!(ticket_id = %ticket.id, partner = %ticket.partner, "Ticket stored");
        self.tickets.push(ticket);
    }

    /// Mutable access for the workflow engine, the store's only writer.
    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| t.id == id)
    }

    // -- ID generation ------------------------------------------------------

    pub fn generate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}
