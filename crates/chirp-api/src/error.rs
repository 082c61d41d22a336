use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use chirp_db::DbError;

/// Every failure a handler can report. Client-facing variants carry the short
/// reason sent back as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
            Self::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason).into_response(),
            Self::Conflict(reason) => (StatusCode::CONFLICT, reason).into_response(),
            Self::Database(_) | Self::Join(_) => {
                error!("request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
