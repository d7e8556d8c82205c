//! Custom extractors for request validation

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
};
use schemars::JsonSchema;
use validator::Validate;

use crate::types::error::AppError;

/// Query string extractor that validates the parameters
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First extract the query
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err: QueryRejection| {
                AppError::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_query",
                    format!("Invalid query parameters: {}", err.body_text()),
                    false,
                )
            })?;

        // Then validate
        params.validate().map_err(|errors| {
            // Report the message of the first failing field
            let message = errors
                .field_errors()
                .into_values()
                .find_map(|field_errors| field_errors.first()?.message.clone());

            match message {
                Some(message) => AppError::new(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    message,
                    false,
                ),
                None => AppError::new(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "Request validation failed",
                    false,
                ),
            }
        })?;

        Ok(Self(params))
    }
}

impl<T> OperationInput for ValidatedQuery<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Same parameters as the plain query extractor
        Query::<T>::operation_input(ctx, operation);
    }
}
