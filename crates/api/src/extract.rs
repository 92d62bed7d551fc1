//! Request body extractor that parses and validates in one step.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON, a wrong content type and failed validation all reject
/// with [`AppError::InvalidPayload`], so clients see one stable message.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateTicket>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            AppError::InvalidPayload
        })?;
        value.validate().map_err(|errors| {
            tracing::debug!(error = %errors, "Request body failed validation");
            AppError::InvalidPayload
        })?;
        Ok(ValidatedJson(value))
    }
}
