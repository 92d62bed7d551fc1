//! Ticket sort keys, orders and the options offered to list views.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    Priority,
    Partner,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::CreatedAt,
        SortKey::Priority,
        SortKey::Partner,
        SortKey::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::Priority => "priority",
            SortKey::Partner => "partner",
            SortKey::Status => "status",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid sort key '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Apply this order to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::Validation(format!("Invalid sort order '{other}'"))),
        }
    }
}

pub const DEFAULT_SORT_BY: SortKey = SortKey::CreatedAt;
pub const DEFAULT_SORT_ORDER: SortOrder = SortOrder::Desc;

/// Sort request for ticket lists. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSort {
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl TicketSort {
    pub fn new(sort_by: SortKey, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }
}

impl Default for TicketSort {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_BY, DEFAULT_SORT_ORDER)
    }
}

/// `createdAt:desc` style token used as a list view's default sort.
pub fn default_sort_token() -> String {
    format!("{}:{}", DEFAULT_SORT_BY.as_str(), DEFAULT_SORT_ORDER.as_str())
}

/// `(label, value)` pairs for every sort option, in display order.
pub const SORT_OPTIONS: &[(&str, &str)] = &[
    ("Created Date Ascending", "createdAt:asc"),
    ("Created Date Descending", "createdAt:desc"),
    ("Priority Ascending", "priority:asc"),
    ("Priority Descending", "priority:desc"),
    ("Partner Ascending", "partner:asc"),
    ("Partner Descending", "partner:desc"),
    ("Status Ascending", "status:asc"),
    ("Status Descending", "status:desc"),
];

/// Locale-style text comparison: case-insensitive first, then exact.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_newest_first() {
        let sort = TicketSort::default();
        assert_eq!(sort.sort_by, SortKey::CreatedAt);
        assert_eq!(sort.sort_order, SortOrder::Desc);
        assert_eq!(default_sort_token(), "createdAt:desc");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!("colour".parse::<SortKey>().is_err());
        assert_eq!("status".parse::<SortKey>().unwrap(), SortKey::Status);
    }

    #[test]
    fn desc_reverses_ordering() {
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn text_comparison_ignores_case_first() {
        assert_eq!(compare_text("alpha", "Beta"), Ordering::Less);
        assert_eq!(compare_text("Studio B", "studio a"), Ordering::Greater);
    }

    #[test]
    fn every_key_has_both_sort_options() {
        for key in SortKey::ALL {
            for order in ["asc", "desc"] {
                let value = format!("{}:{order}", key.as_str());
                assert!(SORT_OPTIONS.iter().any(|(_, v)| *v == value), "{value}");
            }
        }
    }
}
