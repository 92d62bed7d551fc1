//! Domain vocabulary for the recolour workflow.
//!
//! This crate has zero internal dependencies so the store, the workflow
//! engine and the HTTP layer can all share the same status, role and rule
//! definitions.

pub mod catalog;
pub mod error;
pub mod photo;
pub mod roles;
pub mod sorting;
pub mod tracking;
pub mod types;
pub mod view_meta;
pub mod workflow;
