use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;

use chirp_db::DbError;
use chirp_types::api::AccountRequest;
use chirp_types::models::Account;

use crate::error::ApiError;
use crate::validation::is_blank;
use crate::{AppState, blocking, body_or_default};

const MIN_PASSWORD_CHARS: usize = 4;

const INVALID_REGISTRATION: &str = "Invalid username or password";
const USERNAME_TAKEN: &str = "Username already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Username must be non-blank and the password at least four characters.
fn valid_registration(username: &str, password: &str) -> bool {
    !is_blank(username) && password.chars().count() >= MIN_PASSWORD_CHARS
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let req = body_or_default(payload);
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::BadRequest(INVALID_REGISTRATION));
    };
    if !valid_registration(&username, &password) {
        return Err(ApiError::BadRequest(INVALID_REGISTRATION));
    }

    let account = blocking(move || {
        if state.accounts.lookup_by_username(&username)?.is_some() {
            debug!("Registration rejected, username {:?} taken", username);
            return Err(ApiError::Conflict(USERNAME_TAKEN));
        }

        // A concurrent registration can still win between the check and the
        // insert; the UNIQUE constraint catches it.
        state
            .accounts
            .register(&username, &password)
            .map_err(|e| match e {
                DbError::UniqueViolation => ApiError::Conflict(USERNAME_TAKEN),
                other => other.into(),
            })
    })
    .await?;

    Ok(Json(account))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let req = body_or_default(payload);
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    };

    let account = blocking(move || Ok(state.accounts.verify_login(&username, &password)?))
        .await?
        .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

    Ok(Json(account))
}
