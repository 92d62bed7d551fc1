use crate::workflow::TicketStatus;

/// Expected failures of ticket store operations.
///
/// Engine operations return this as the error half of a `Result` so every
/// caller has to decide how to surface a missing ticket or an illegal edge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Ticket not found: {id}")]
    NotFound { id: String },

    #[error("Invalid ticket state transition: {from} -> {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unsupported file type: {extension}. Allowed: {allowed}")]
    UnsupportedFileType { extension: String, allowed: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => CoreError::NotFound {
                entity: "Ticket",
                id,
            },
            StoreError::InvalidTransition { from, to } => {
                CoreError::InvalidTransition { from, to }
            }
        }
    }
}
