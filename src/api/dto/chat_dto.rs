//! Dating-chat DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::chat_message::ChatMessage;

/// Request body for `POST /dating/chat`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Dating profile being chatted with.
    pub profile_id: String,
    /// The user's message.
    pub message: String,
}

/// Response body for `POST /dating/chat`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Generated (or fallback) reply.
    pub reply: String,
}

/// One stored chat message.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    /// Dating profile the message belongs to.
    pub profile_id: String,
    /// Message text.
    pub message: String,
    /// `true` for the user's own messages.
    pub is_from_user: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            profile_id: message.profile_id,
            message: message.body,
            is_from_user: message.from_user,
            created_at: message.created_at,
        }
    }
}
