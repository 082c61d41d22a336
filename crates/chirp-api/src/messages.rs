use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use chirp_db::DbError;
use chirp_db::models::NewMessage;
use chirp_types::api::{CreateMessageRequest, UpdateMessageRequest};
use chirp_types::models::Message;

use crate::error::ApiError;
use crate::validation::is_blank;
use crate::{AppState, blocking, body_or_default};

const MAX_MESSAGE_CHARS: usize = 255;

const INVALID_MESSAGE: &str = "Invalid message or user";
const INVALID_TEXT: &str = "Invalid message text";
const UPDATE_FAILED: &str = "Message not found or update failed";

/// Text must be non-blank and at most 255 characters.
fn valid_message_text(text: &str) -> bool {
    !is_blank(text) && text.chars().count() <= MAX_MESSAGE_CHARS
}

pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let req = body_or_default(payload);
    let message_text = req
        .message_text
        .filter(|text| valid_message_text(text))
        .ok_or(ApiError::BadRequest(INVALID_MESSAGE))?;
    let posted_by = req.posted_by.ok_or(ApiError::BadRequest(INVALID_MESSAGE))?;

    let new_message = NewMessage {
        posted_by,
        message_text,
        time_posted_epoch: req.time_posted_epoch.unwrap_or_default(),
    };

    let message = blocking(move || {
        if state.accounts.lookup_by_id(posted_by)?.is_none() {
            return Err(ApiError::BadRequest(INVALID_MESSAGE));
        }
        state.messages.create(&new_message).map_err(|e| match e {
            DbError::ForeignKeyViolation => ApiError::BadRequest(INVALID_MESSAGE),
            other => other.into(),
        })
    })
    .await?;

    Ok(Json(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = blocking(move || Ok(state.messages.list_all()?)).await?;
    Ok(Json(messages))
}

/// An unknown id is answered with 200 and an empty body, not 404.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = blocking(move || Ok(state.messages.get_by_id(message_id)?)).await?;

    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// Body is `1` when a row was removed; an unknown id gets 200 with an empty body.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let removed = blocking(move || Ok(state.messages.delete_by_id(message_id)?)).await?;

    Ok(if removed == 1 {
        Json(removed).into_response()
    } else {
        StatusCode::OK.into_response()
    })
}

/// Invalid text and an unknown id both answer 400.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Json<usize>, ApiError> {
    let req = body_or_default(payload);
    let new_text = req
        .message_text
        .filter(|text| valid_message_text(text))
        .ok_or(ApiError::BadRequest(INVALID_TEXT))?;

    let updated =
        blocking(move || Ok(state.messages.update_text(message_id, &new_text)?)).await?;

    if updated == 1 {
        Ok(Json(updated))
    } else {
        Err(ApiError::BadRequest(UPDATE_FAILED))
    }
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = blocking(move || Ok(state.messages.list_by_account(account_id)?)).await?;
    Ok(Json(messages))
}
