//! Recolour workflow engine.
//!
//! [`TicketService`] is the only writer of the ticket store. It creates
//! tickets, records field edits and status changes in each ticket's history,
//! and scopes reads to the calling role. [`PhotoService`] stores partner
//! uploads on disk and [`dashboard`] projects read-only reporting views.

pub mod dashboard;
pub mod photo_service;
pub mod seed;
pub mod ticket_service;

pub use photo_service::{PhotoError, PhotoService};
pub use ticket_service::{ListResponse, MetaOptions, TicketService};
