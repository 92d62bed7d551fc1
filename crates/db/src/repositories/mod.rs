//! Repository layer.
//!
//! In-memory stores owned by a single writer. Queries hand out borrowed
//! records; callers copy what they return across their own boundary.

pub mod ticket_repo;

pub use ticket_repo::{RepoTicketFilters, TicketRepo};
