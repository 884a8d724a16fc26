//! Typed path parameters with JSON error responses.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Extractor for typed path parameters.
///
/// Works like [`axum::extract::Path`] but a segment that does not parse into
/// `T` is rejected with `400 INVALID_PATH_PARAMETER`.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::put};
/// use axum_helpers::extractors::ParsedPath;
///
/// async fn decrement(ParsedPath((id, quantity)): ParsedPath<(i32, i32)>) -> String {
///     format!("{id}: -{quantity}")
/// }
///
/// let app = Router::new().route("/decrement-stock/{id}/{quantity}", put(decrement));
/// ```
#[derive(Debug)]
pub struct ParsedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ParsedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ParsedPath(value)),
            Err(PathRejection::FailedToDeserializePathParams(e)) => {
                Err(AppError::InvalidPathParameter(e.body_text()))
            }
            Err(e) => Err(AppError::InternalServerError(e.body_text())),
        }
    }
}
