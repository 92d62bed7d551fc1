//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthRole`] and rejects requests whose role does not
//! meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use recolour_core::error::CoreError;
use recolour_core::roles::Role;
use recolour_core::workflow::WorkflowAction;

use super::auth::AuthRole;
use crate::error::{AppError, MSG_FORBIDDEN};

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(MSG_FORBIDDEN.into()))
}

/// Requires the manager role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn manager_only(_: RequireManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub Role);

impl<S> FromRequestParts<S> for RequireManager
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRole(role) = AuthRole::from_request_parts(parts, state).await?;
        match role {
            Role::Manager => Ok(RequireManager(role)),
            _ => Err(forbidden()),
        }
    }
}

/// Requires manager or operator. Rejects partners with 403 Forbidden.
pub struct RequireStaff(pub Role);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRole(role) = AuthRole::from_request_parts(parts, state).await?;
        match role {
            Role::Manager | Role::Operator => Ok(RequireStaff(role)),
            Role::Partner(_) => Err(forbidden()),
        }
    }
}

/// Requires a partner studio. Carries the partner's name.
pub struct RequirePartner(pub String);

impl<S> FromRequestParts<S> for RequirePartner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRole(role) = AuthRole::from_request_parts(parts, state).await?;
        match role {
            Role::Partner(name) => Ok(RequirePartner(name)),
            _ => Err(forbidden()),
        }
    }
}

/// Check the role-to-action table before a status change is attempted.
///
/// The engine still validates the edge itself, so an allowed role on a
/// ticket in the wrong state gets "Invalid ticket state transition" rather
/// than 403.
pub fn require_action(role: &Role, action: WorkflowAction) -> Result<(), AppError> {
    if action.is_allowed_for(role.kind()) {
        Ok(())
    } else {
        tracing::debug!(
            role = role.kind().as_str(),
            action = action.as_str(),
            "Action not permitted"
        );
        Err(forbidden())
    }
}
