use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Product id in path ({path}) does not match productId in body ({body})")]
    IdMismatch { path: i32, body: i32 },

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    /// The row exists but a full-record write reported no change
    #[error("Product {0} could not be updated although it still exists")]
    ConcurrencyConflict(i32),

    #[error("Product id sequence exhausted")]
    IdSequenceExhausted,

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with id {} not found", id))
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            err @ ProductError::IdMismatch { .. } => AppError::BadRequest(err.to_string()),
            ProductError::InsufficientStock { .. } => {
                AppError::BadRequest("Not enough stock to decrement.".to_string())
            }
            err @ (ProductError::ConcurrencyConflict(_) | ProductError::IdSequenceExhausted) => {
                AppError::InternalServerError(err.to_string())
            }
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
