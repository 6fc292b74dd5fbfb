//! JSON body extractor that reports malformed bodies in the API error format.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use roster_core::RosterError;
use serde::de::DeserializeOwned;

/// JSON extractor whose rejection is a `400 VALIDATION_ERROR` body.
///
/// Field-level validation runs in the service, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_app_error)?;

        Ok(ApiJson(value))
    }
}

fn json_rejection_to_app_error(rejection: JsonRejection) -> AppError {
    AppError(RosterError::validation(format!("Invalid JSON body: {}", rejection.body_text())))
}
