//! Dating-chat handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ChatMessageDto, ChatRequest, ChatResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PortalError};

/// `POST /dating/chat` — Send a chat message and receive a reply.
///
/// Generation failures are masked with a fallback reply; this endpoint
/// only fails when the account does not exist.
///
/// # Errors
///
/// Returns [`PortalError::AccountNotFound`] before the first login.
#[utoipa::path(
    post,
    path = "/api/v1/dating/chat",
    tag = "Dating",
    summary = "Send a chat message",
    description = "Stores the message, generates a reply via the text-generation collaborator (or a fallback), stores it, and returns it.",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated reply", body = ChatResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let reply = state
        .chat
        .send_message(&state.account_name, &req.profile_id, &req.message)
        .await?;
    Ok(Json(ChatResponse { reply }))
}

/// `GET /dating/messages/{profile_id}` — Conversation history.
///
/// # Errors
///
/// Returns [`PortalError::AccountNotFound`] before the first login.
#[utoipa::path(
    get,
    path = "/api/v1/dating/messages/{profile_id}",
    tag = "Dating",
    summary = "Get conversation history",
    description = "Returns all messages exchanged with one dating profile, oldest first.",
    params(
        ("profile_id" = String, Path, description = "Dating profile identifier"),
    ),
    responses(
        (status = 200, description = "Message history", body = Vec<ChatMessageDto>),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<impl IntoResponse, PortalError> {
    let messages = state.chat.history(&state.account_name, &profile_id).await?;
    let history: Vec<ChatMessageDto> = messages.into_iter().map(ChatMessageDto::from).collect();
    Ok(Json(history))
}

/// Dating-chat routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dating/chat", post(send_chat))
        .route("/dating/messages/{profile_id}", get(get_messages))
}
