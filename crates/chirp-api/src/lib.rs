pub mod account_service;
pub mod accounts;
pub mod error;
pub mod message_service;
pub mod messages;
mod validation;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use tracing::{debug, error};

use crate::account_service::AccountService;
use crate::error::ApiError;
use crate::message_service::MessageService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

/// All public routes. Cross-cutting layers (tracing, CORS) are added by the
/// server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::update_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::list_account_messages),
        )
        .with_state(state)
}

/// Run blocking service calls off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::from(e)
    })?
}

/// An unreadable body (not JSON, or JSON that is not an object) is treated as
/// one with every field absent, so the handler's own validation decides the
/// status.
pub(crate) fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Unreadable request body: {}", rejection.body_text());
            T::default()
        }
    }
}
