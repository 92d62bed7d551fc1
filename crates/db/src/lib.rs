//! Ticket store for the recolour workflow.
//!
//! Tickets are held in memory by [`repositories::TicketRepo`]; the store has
//! no business rules of its own. The workflow engine is its only writer.

pub mod models;
pub mod repositories;

pub use repositories::TicketRepo;
