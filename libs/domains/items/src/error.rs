use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} not found")]
    NotFound(i32),

    #[error("Item with title '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        let message = err.to_string();
        match err {
            ItemError::NotFound(_) => AppError::NotFound(message),
            ItemError::DuplicateTitle(_) => AppError::Conflict(message),
            ItemError::Validation(msg) => AppError::UnprocessableEntity(msg),
            ItemError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<validator::ValidationErrors> for ItemError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ItemError::Validation(errors.to_string())
    }
}
