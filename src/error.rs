use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::iris::model::ModelError;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Something went wrong on our end";

/// Any possible server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    AxumFormRejection(#[from] FormRejection),

    #[error(transparent)]
    AxumJsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    AxumQueryRejection(#[from] QueryRejection),

    #[error(transparent)]
    AxumPathRejection(#[from] PathRejection),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid resource URI")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    DbError(#[from] DbErr),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error("{0}")]
    Internal(String),
}

/// The JSON body sent back for every error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ServerError {
    /// Turn a unique or primary-key violation from an insert into a 409 with
    /// `message`. Any other database error stays a 500.
    pub fn conflict_on_duplicate(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServerError::Conflict(message.into()),
            _ => ServerError::DbError(err),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ServerError::ValidationError(_)
            | ServerError::AxumFormRejection(_)
            | ServerError::AxumJsonRejection(_)
            | ServerError::AxumQueryRejection(_)
            | ServerError::AxumPathRejection(_)
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::DbError(_) | ServerError::ModelError(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::ValidationError(_) => {
                format!("Input validation error: [{}]", self).replace('\n', ", ")
            }
            ServerError::DbError(e) => {
                tracing::debug!("Database error occurred: {:?}", e);
                INTERNAL_SERVER_ERROR_MESSAGE.into()
            }
            ServerError::ModelError(e) => {
                tracing::error!("Prediction failed: {}", e);
                INTERNAL_SERVER_ERROR_MESSAGE.into()
            }
            ServerError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                INTERNAL_SERVER_ERROR_MESSAGE.into()
            }
            _ => self.to_string(),
        };
        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
