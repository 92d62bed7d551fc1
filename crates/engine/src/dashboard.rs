//! Read-only reporting over the ticket store: partner overview rows and the
//! manager dashboard.

use indexmap::IndexMap;
use serde::Serialize;

use recolour_core::sorting::TicketSort;
use recolour_core::view_meta::{partner_overview_meta, ColumnDef, PARTNER_OVERVIEW_COLUMNS};
use recolour_core::workflow::{Priority, TicketStatus};
use recolour_db::models::ticket::Ticket;
use recolour_db::repositories::{RepoTicketFilters, TicketRepo};

use crate::ticket_service::ListResponse;

/// Shown as the top partner when there are no tickets at all.
pub const NO_TOP_PARTNER: &str = "—";

/// Priority breakdown rows are always listed most urgent first.
const PRIORITY_BREAKDOWN_ORDER: [Priority; 4] = [
    Priority::Urgent,
    Priority::High,
    Priority::Medium,
    Priority::Low,
];

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerOverviewRow {
    pub partner: String,
    pub total: usize,
    pub awaiting_receipt: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiTone {
    Accent,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: KpiValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<KpiTone>,
}

impl KpiCard {
    fn count(label: &'static str, value: usize, tone: Option<KpiTone>) -> Self {
        Self {
            label,
            value: KpiValue::Number(value),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub count: usize,
    /// Share of active (non-Approved) tickets, rounded to a whole percent.
    pub pct: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub kpi_cards: Vec<KpiCard>,
    pub status_breakdown: Vec<BreakdownRow>,
    pub priority_breakdown: Vec<BreakdownRow>,
    pub partner_overview: Vec<PartnerOverviewRow>,
    pub partner_overview_columns: Vec<ColumnDef>,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Every ticket, newest first. Projections count in this order so that
/// "first seen" means most recently created.
fn all_tickets(repo: &TicketRepo) -> Vec<&Ticket> {
    repo.list(&RepoTicketFilters::default(), &TicketSort::default())
}

/// One row per partner in first-seen order.
pub fn partner_overview(repo: &TicketRepo) -> Vec<PartnerOverviewRow> {
    let mut rows: IndexMap<&str, PartnerOverviewRow> = IndexMap::new();
    for ticket in all_tickets(repo) {
        let row = rows
            .entry(ticket.partner.as_str())
            .or_insert_with(|| PartnerOverviewRow {
                partner: ticket.partner.clone(),
                total: 0,
                awaiting_receipt: 0,
                in_progress: 0,
                completed: 0,
            });
        row.total += 1;
        match ticket.status {
            TicketStatus::Sent => row.awaiting_receipt += 1,
            TicketStatus::InProgress => row.in_progress += 1,
            TicketStatus::Completed => row.completed += 1,
            _ => {}
        }
    }
    rows.into_values().collect()
}

pub fn partner_overview_response(repo: &TicketRepo) -> ListResponse<PartnerOverviewRow> {
    ListResponse {
        data: partner_overview(repo),
        meta: partner_overview_meta(),
    }
}

fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// KPI cards, breakdowns and partner overview for the manager dashboard.
///
/// Approved tickets only contribute to the "Approved Total" card; every
/// other figure is computed over active tickets.
pub fn dashboard_stats(repo: &TicketRepo) -> DashboardStats {
    let mut by_status: IndexMap<TicketStatus, usize> = IndexMap::new();
    let mut by_priority: IndexMap<Priority, usize> = IndexMap::new();
    let mut total_approved = 0;
    let mut urgent_open = 0;

    for ticket in all_tickets(repo) {
        if ticket.status == TicketStatus::Approved {
            total_approved += 1;
            continue;
        }
        *by_status.entry(ticket.status).or_default() += 1;
        *by_priority.entry(ticket.priority).or_default() += 1;
        if ticket.priority == Priority::Urgent && ticket.status != TicketStatus::Completed {
            urgent_open += 1;
        }
    }

    let overview = partner_overview(repo);
    let total_active: usize = by_status.values().sum();
    let status_count = |status: TicketStatus| by_status.get(&status).copied().unwrap_or(0);

    // First maximum wins on ties.
    let top_partner = overview
        .iter()
        .fold(None::<&PartnerOverviewRow>, |best, row| match best {
            Some(b) if b.total >= row.total => Some(b),
            _ => Some(row),
        })
        .map(|row| format!("{} ({})", row.partner, row.total))
        .unwrap_or_else(|| NO_TOP_PARTNER.to_string());

    let kpi_cards = vec![
        KpiCard::count("Active Tickets", total_active, Some(KpiTone::Accent)),
        KpiCard::count("Pending", status_count(TicketStatus::Pending), None),
        KpiCard::count(
            "In Progress",
            status_count(TicketStatus::InProgress),
            Some(KpiTone::Accent),
        ),
        KpiCard::count(
            "Awaiting Receipt",
            status_count(TicketStatus::Sent),
            Some(KpiTone::Warning),
        ),
        KpiCard::count(
            "Awaiting Approval",
            status_count(TicketStatus::Completed),
            Some(KpiTone::Warning),
        ),
        KpiCard::count("Approved Total", total_approved, Some(KpiTone::Success)),
        KpiCard::count("Urgent Open", urgent_open, Some(KpiTone::Error)),
        KpiCard {
            label: "Top Partner",
            value: KpiValue::Text(top_partner),
            tone: None,
        },
    ];

    let mut status_breakdown: Vec<BreakdownRow> = by_status
        .iter()
        .map(|(status, count)| BreakdownRow {
            label: status.as_str().to_string(),
            count: *count,
            pct: percent(*count, total_active),
        })
        .collect();
    status_breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    let priority_breakdown = PRIORITY_BREAKDOWN_ORDER
        .iter()
        .filter_map(|priority| {
            let count = by_priority.get(priority).copied().unwrap_or(0);
            (count > 0).then(|| BreakdownRow {
                label: priority.as_str().to_string(),
                count,
                pct: percent(count, total_active),
            })
        })
        .collect();

    DashboardStats {
        kpi_cards,
        status_breakdown,
        priority_breakdown,
        partner_overview: overview,
        partner_overview_columns: PARTNER_OVERVIEW_COLUMNS.to_vec(),
    }
}
