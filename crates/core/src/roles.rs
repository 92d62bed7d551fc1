//! Request roles and the authorization-header convention that names them.
//!
//! Manager sends `manager`, operator sends `operator`, a partner studio
//! sends `partner:<name>`.

use serde::Serialize;

pub const AUTH_ROLE_MANAGER: &str = "manager";
pub const AUTH_ROLE_OPERATOR: &str = "operator";
pub const AUTH_PARTNER_PREFIX: &str = "partner:";

/// Role category used by the permission tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Manager,
    Operator,
    Partner,
}

impl RoleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::Manager => AUTH_ROLE_MANAGER,
            RoleKind::Operator => AUTH_ROLE_OPERATOR,
            RoleKind::Partner => "partner",
        }
    }
}

/// The resolved caller of a request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Manager,
    Operator,
    Partner(String),
}

impl Role {
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Manager => RoleKind::Manager,
            Role::Operator => RoleKind::Operator,
            Role::Partner(_) => RoleKind::Partner,
        }
    }

    /// The partner studio this role is scoped to, if any.
    pub fn partner_name(&self) -> Option<&str> {
        match self {
            Role::Partner(name) => Some(name),
            _ => None,
        }
    }

    /// Display label recorded as the actor of history events.
    pub fn actor_label(&self) -> String {
        match self {
            Role::Partner(name) => name.clone(),
            other => other.kind().as_str().to_string(),
        }
    }

    /// Parse an authorization header value. Returns `None` for anything that
    /// does not follow the convention, including an empty partner name.
    pub fn parse_header(value: &str) -> Option<Role> {
        let value = value.trim();
        if value == AUTH_ROLE_MANAGER {
            return Some(Role::Manager);
        }
        if value == AUTH_ROLE_OPERATOR {
            return Some(Role::Operator);
        }
        let name = value.strip_prefix(AUTH_PARTNER_PREFIX)?.trim();
        if name.is_empty() {
            None
        } else {
            Some(Role::Partner(name.to_string()))
        }
    }
}
