//! Presentation metadata returned alongside list responses: filter
//! definitions, sort options, column layouts and the default sort.

use serde::Serialize;

use crate::sorting::{default_sort_token, SORT_OPTIONS};
use crate::workflow::{Priority, TicketStatus, PARTNER_VISIBLE_STATUSES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptionDef {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMeta {
    pub filters: Vec<FilterOptionDef>,
    pub sort_options: Vec<SelectOption>,
    pub columns: Vec<ColumnDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
}

// ---------------------------------------------------------------------------
// Column layouts
// ---------------------------------------------------------------------------

pub const QUEUE_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        key: "id",
        label: "Ticket ID",
    },
    ColumnDef {
        key: "priority",
        label: "Priority",
    },
    ColumnDef {
        key: "partner",
        label: "Partner",
    },
    ColumnDef {
        key: "status",
        label: "Status",
    },
    ColumnDef {
        key: "actions",
        label: "Actions",
    },
];

pub const PARTNER_TICKET_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        key: "id",
        label: "Ticket ID",
    },
    ColumnDef {
        key: "priority",
        label: "Priority",
    },
    ColumnDef {
        key: "status",
        label: "Status",
    },
    ColumnDef {
        key: "actions",
        label: "Actions",
    },
];

pub const APPROVED_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        key: "id",
        label: "Ticket ID",
    },
    ColumnDef {
        key: "partner",
        label: "Partner",
    },
    ColumnDef {
        key: "approvedDate",
        label: "Approved Date",
    },
];

pub const APPROVED_COLUMNS_PARTNER: &[ColumnDef] = &[
    ColumnDef {
        key: "id",
        label: "Ticket ID",
    },
    ColumnDef {
        key: "approvedDate",
        label: "Approved Date",
    },
];

pub const PARTNER_OVERVIEW_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        key: "partner",
        label: "Partner",
    },
    ColumnDef {
        key: "total",
        label: "Total",
    },
    ColumnDef {
        key: "awaitingReceipt",
        label: "Awaiting Receipt",
    },
    ColumnDef {
        key: "inProgress",
        label: "In Progress",
    },
    ColumnDef {
        key: "completed",
        label: "Completed",
    },
];

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn to_options<I, S>(values: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(|v| {
            let value = v.into();
            SelectOption {
                label: value.clone(),
                value,
            }
        })
        .collect()
}

fn status_filter(statuses: &[TicketStatus]) -> FilterOptionDef {
    FilterOptionDef {
        key: "status",
        label: "Status",
        options: to_options(statuses.iter().map(|s| s.as_str())),
        placeholder: Some("All Statuses"),
    }
}

fn priority_filter() -> FilterOptionDef {
    FilterOptionDef {
        key: "priority",
        label: "Priority",
        options: to_options(Priority::ALL.iter().map(|p| p.as_str())),
        placeholder: Some("All Priorities"),
    }
}

fn list_meta(filters: Vec<FilterOptionDef>, columns: &[ColumnDef]) -> ViewMeta {
    ViewMeta {
        filters,
        sort_options: SORT_OPTIONS
            .iter()
            .map(|(label, value)| SelectOption {
                label: (*label).to_string(),
                value: (*value).to_string(),
            })
            .collect(),
        columns: columns.to_vec(),
        default_sort: Some(default_sort_token()),
    }
}

fn columns_only_meta(columns: &[ColumnDef]) -> ViewMeta {
    ViewMeta {
        filters: Vec::new(),
        sort_options: Vec::new(),
        columns: columns.to_vec(),
        default_sort: None,
    }
}

/// Manager/operator queue. The partner filter lists every known partner.
pub fn queue_meta(partners: &[String]) -> ViewMeta {
    list_meta(
        vec![
            status_filter(&TicketStatus::ALL),
            priority_filter(),
            FilterOptionDef {
                key: "partner",
                label: "Partner",
                options: to_options(partners.iter().cloned()),
                placeholder: Some("All Partners"),
            },
        ],
        QUEUE_COLUMNS,
    )
}

/// Partner-scoped ticket list. No partner filter.
pub fn partner_ticket_list_meta() -> ViewMeta {
    list_meta(
        vec![status_filter(PARTNER_VISIBLE_STATUSES), priority_filter()],
        PARTNER_TICKET_COLUMNS,
    )
}

pub fn approved_meta() -> ViewMeta {
    columns_only_meta(APPROVED_COLUMNS)
}

pub fn approved_meta_for_partner() -> ViewMeta {
    columns_only_meta(APPROVED_COLUMNS_PARTNER)
}

pub fn partner_overview_meta() -> ViewMeta {
    columns_only_meta(PARTNER_OVERVIEW_COLUMNS)
}
