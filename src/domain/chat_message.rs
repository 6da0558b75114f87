//! Dating-chat messages owned by the account.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One message of a dating-chat conversation.
///
/// Append-only; conversations are keyed by the profile the user is
/// chatting with and read back oldest-first.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Dating profile this message belongs to.
    pub profile_id: String,
    /// Message text.
    pub body: String,
    /// `true` for the user's own messages, `false` for generated replies.
    pub from_user: bool,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn new(profile_id: impl Into<String>, body: impl Into<String>, from_user: bool) -> Self {
        Self {
            profile_id: profile_id.into(),
            body: body.into(),
            from_user,
            created_at: Utc::now(),
        }
    }
}
