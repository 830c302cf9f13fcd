//! Request-level errors and their HTTP mapping.
//!
//! Validation failures are 400s, a missing item is a 404, and anything else
//! the store reports is a 500 carrying the store's message. Every error body
//! is `{"error": <message>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use todo_core::ErrorBody;
use tracing::error;

use crate::repository::StoreError;

/// Malformed or missing request input, detected before the service is called.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input body")]
    InvalidBody,
    #[error("{0}")]
    MalformedBody(String),
    #[error("Invalid ID")]
    InvalidId,
    /// Carries the integer parser's own message.
    #[error("{0}")]
    UnparsableId(String),
    #[error("update requires at least one field")]
    EmptyUpdate,
    #[error("title must not be empty")]
    BlankTitle,
    #[error("Invalid date format")]
    InvalidDate,
    #[error("Invalid limit")]
    InvalidLimit,
    #[error("Invalid offset")]
    InvalidOffset,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::EmptyUpdate) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
