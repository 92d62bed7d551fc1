//! Header-based role extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use recolour_core::error::CoreError;
use recolour_core::roles::Role;

use crate::error::{AppError, MSG_UNAUTHORIZED};

/// The caller's role, read from the `Authorization` header.
///
/// Accepted values are `manager`, `operator` and `partner:<name>`. A missing
/// header or any other value rejects with 401.
///
/// ```ignore
/// async fn my_handler(AuthRole(role): AuthRole) -> AppResult<Json<()>> {
///     tracing::info!(actor = %role.actor_label(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthRole(pub Role);

impl<S> FromRequestParts<S> for AuthRole
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse_header)
            .map(AuthRole)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_UNAUTHORIZED.into())))
    }
}
