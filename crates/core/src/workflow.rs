//! Ticket statuses, priorities, workflow actions and the static rule tables
//! that connect them.
//!
//! Everything here is plain data: which status may follow which, which
//! action name labels each edge, and which roles may invoke each action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, StoreError};
use crate::roles::RoleKind;

// ---------------------------------------------------------------------------
// Ticket status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Pending,
    Sent,
    Received,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Approved,
}

impl TicketStatus {
    /// Every status, in workflow order.
    pub const ALL: [TicketStatus; 6] = [
        TicketStatus::Pending,
        TicketStatus::Sent,
        TicketStatus::Received,
        TicketStatus::InProgress,
        TicketStatus::Completed,
        TicketStatus::Approved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::Sent => "Sent",
            TicketStatus::Received => "Received",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Completed => "Completed",
            TicketStatus::Approved => "Approved",
        }
    }

    /// Sort rank. Status sorts follow workflow order, not lexical order.
    pub fn rank(self) -> u8 {
        match self {
            TicketStatus::Pending => 1,
            TicketStatus::Sent => 2,
            TicketStatus::Received => 3,
            TicketStatus::InProgress => 4,
            TicketStatus::Completed => 5,
            TicketStatus::Approved => 6,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid ticket status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub const DEFAULT: Priority = Priority::Medium;

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    /// Sort rank: Low < Medium < High < Urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid priority '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Workflow actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowAction {
    Send,
    Receive,
    Start,
    Complete,
    Approve,
    Reject,
}

impl WorkflowAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowAction::Send => "send",
            WorkflowAction::Receive => "receive",
            WorkflowAction::Start => "start",
            WorkflowAction::Complete => "complete",
            WorkflowAction::Approve => "approve",
            WorkflowAction::Reject => "reject",
        }
    }

    /// The status this action moves a ticket into.
    pub fn target_status(self) -> TicketStatus {
        match self {
            WorkflowAction::Send => TicketStatus::Sent,
            WorkflowAction::Receive => TicketStatus::Received,
            WorkflowAction::Start => TicketStatus::InProgress,
            WorkflowAction::Complete => TicketStatus::Completed,
            WorkflowAction::Approve => TicketStatus::Approved,
            WorkflowAction::Reject => TicketStatus::Pending,
        }
    }

    /// Roles permitted to invoke this action. Empty when the table has no entry.
    pub fn allowed_roles(self) -> &'static [RoleKind] {
        ACTION_ROLE_ALLOWED
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }

    pub fn is_allowed_for(self, role: RoleKind) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Role restrictions per action. Fail-closed: an action missing from this
/// table is allowed to no role.
pub const ACTION_ROLE_ALLOWED: &[(WorkflowAction, &[RoleKind])] = &[
    (WorkflowAction::Send, &[RoleKind::Manager, RoleKind::Operator]),
    (WorkflowAction::Receive, &[RoleKind::Partner]),
    (WorkflowAction::Start, &[RoleKind::Partner]),
    (WorkflowAction::Complete, &[RoleKind::Partner]),
    (WorkflowAction::Approve, &[RoleKind::Manager]),
    (WorkflowAction::Reject, &[RoleKind::Manager]),
];

/// Statuses shown in the manager/operator queue (everything except Approved).
pub const QUEUE_VISIBLE_STATUSES: &[TicketStatus] = &[
    TicketStatus::Pending,
    TicketStatus::Sent,
    TicketStatus::Received,
    TicketStatus::InProgress,
    TicketStatus::Completed,
];

/// Statuses a partner can see. Pending tickets are not yet the partner's
/// concern and Approved ones live in the approved library.
pub const PARTNER_VISIBLE_STATUSES: &[TicketStatus] = &[
    TicketStatus::Sent,
    TicketStatus::Received,
    TicketStatus::InProgress,
    TicketStatus::Completed,
];

/// Returns the statuses reachable from `from`, in declaration order.
///
/// - `Pending`     -> `Sent`
/// - `Sent`        -> `Received`, `In Progress`
/// - `Received`    -> `In Progress`
/// - `In Progress` -> `Completed`
/// - `Completed`   -> `Approved`, `Pending` (reject)
/// - `Approved`    -> terminal
pub fn allowed_transitions(from: TicketStatus) -> &'static [TicketStatus] {
    match from {
        TicketStatus::Pending => &[TicketStatus::Sent],
        TicketStatus::Sent => &[TicketStatus::Received, TicketStatus::InProgress],
        TicketStatus::Received => &[TicketStatus::InProgress],
        TicketStatus::InProgress => &[TicketStatus::Completed],
        TicketStatus::Completed => &[TicketStatus::Approved, TicketStatus::Pending],
        TicketStatus::Approved => &[],
    }
}

/// Maps a target status to the action name that reaches it.
pub fn action_for_target(to: TicketStatus) -> WorkflowAction {
    match to {
        TicketStatus::Sent => WorkflowAction::Send,
        TicketStatus::Received => WorkflowAction::Receive,
        TicketStatus::InProgress => WorkflowAction::Start,
        TicketStatus::Completed => WorkflowAction::Complete,
        TicketStatus::Approved => WorkflowAction::Approve,
        TicketStatus::Pending => WorkflowAction::Reject,
    }
}

pub fn can_transition(from: TicketStatus, to: TicketStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Structural transition check. Does not look at roles; permission is the
/// caller's gate.
pub fn validate_transition(from: TicketStatus, to: TicketStatus) -> Result<(), StoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(StoreError::InvalidTransition { from, to })
    }
}

/// Actions `role` may currently invoke on a ticket in `status`, in
/// transition-table order.
pub fn actions_for(status: TicketStatus, role: RoleKind) -> Vec<WorkflowAction> {
    allowed_transitions(status)
        .iter()
        .map(|to| action_for_target(*to))
        .filter(|action| action.is_allowed_for(role))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
