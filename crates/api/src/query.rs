//! Query parameter types for API handlers.

use serde::Deserialize;

use recolour_core::sorting::{SortKey, SortOrder, TicketSort, DEFAULT_SORT_BY, DEFAULT_SORT_ORDER};
use recolour_core::workflow::{Priority, TicketStatus};
use recolour_db::models::ticket::TicketFilters;

use crate::error::{AppError, AppResult};

/// Query parameters for `GET /api/tickets`.
///
/// Values arrive as raw strings. They are trimmed, a blank value counts as
/// absent, and anything left that does not parse rejects the whole request
/// with [`AppError::InvalidQuery`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub partner: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_opt<T: std::str::FromStr>(value: &Option<String>) -> AppResult<Option<T>> {
    present(value)
        .map(|v| v.parse::<T>().map_err(|_| AppError::InvalidQuery))
        .transpose()
}

impl ListTicketsQuery {
    /// Split into store filters and a sort. Sort key and order default
    /// independently.
    pub fn parse(&self) -> AppResult<(TicketFilters, TicketSort)> {
        let filters = TicketFilters {
            status: parse_opt::<TicketStatus>(&self.status)?,
            priority: parse_opt::<Priority>(&self.priority)?,
            partner: present(&self.partner).map(str::to_string),
        };
        let sort = TicketSort::new(
            parse_opt::<SortKey>(&self.sort_by)?.unwrap_or(DEFAULT_SORT_BY),
            parse_opt::<SortOrder>(&self.sort_order)?.unwrap_or(DEFAULT_SORT_ORDER),
        );
        Ok((filters, sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn query(pairs: &[(&str, &str)]) -> ListTicketsQuery {
        let mut q = ListTicketsQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "status" => q.status = value,
                "priority" => q.priority = value,
                "partner" => q.partner = value,
                "sortBy" => q.sort_by = value,
                "sortOrder" => q.sort_order = value,
                other => panic!("unexpected key {other}"),
            }
        }
        q
    }

    #[test]
    fn empty_query_uses_defaults() {
        let (filters, sort) = query(&[]).parse().unwrap();
        assert_eq!(filters, TicketFilters::default());
        assert_eq!(sort, TicketSort::default());
    }

    #[test]
    fn blank_values_count_as_absent() {
        let (filters, sort) = query(&[("status", "  "), ("partner", ""), ("sortBy", " ")])
            .parse()
            .unwrap();
        assert_eq!(filters, TicketFilters::default());
        assert_eq!(sort.sort_by, SortKey::CreatedAt);
    }

    #[test]
    fn values_are_trimmed_before_parsing() {
        let (filters, sort) = query(&[
            ("status", " In Progress "),
            ("priority", "Urgent"),
            ("partner", " Studio Alpha "),
            ("sortOrder", "asc"),
        ])
        .parse()
        .unwrap();
        assert_eq!(filters.status, Some(TicketStatus::InProgress));
        assert_eq!(filters.priority, Some(Priority::Urgent));
        assert_eq!(filters.partner.as_deref(), Some("Studio Alpha"));
        assert_eq!(sort, TicketSort::new(SortKey::CreatedAt, SortOrder::Asc));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_matches!(query(&[("status", "Done")]).parse(), Err(AppError::InvalidQuery));
        assert_matches!(query(&[("sortBy", "style")]).parse(), Err(AppError::InvalidQuery));
        assert_matches!(query(&[("sortOrder", "up")]).parse(), Err(AppError::InvalidQuery));
    }
}
