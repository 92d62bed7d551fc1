//! Role resolution and authorization extractors.
//!
//! - [`auth::AuthRole`] -- Resolves the caller's role from the `Authorization` header.
//! - [`rbac::RequireManager`] -- Requires the manager role.
//! - [`rbac::RequireStaff`] -- Requires manager or operator.
//! - [`rbac::RequirePartner`] -- Requires a partner studio.
//! - [`ticket_access::require_photo_access`] -- Ownership and status gate for photo routes.

pub mod auth;
pub mod rbac;
pub mod ticket_access;
