//! Domain events reflecting account state mutations.
//!
//! Every state change emits an [`AccountEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers and
//! optionally appended to the PostgreSQL telemetry log by the recorder.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AccountId;
use super::ticket::ClaimKind;

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_kind", rename_all = "snake_case")]
pub enum AccountEvent {
    /// Emitted when the account is created on first login.
    AccountCreated {
        /// Account identifier.
        account_id: AccountId,
        /// Account name.
        name: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after the reward engine applies a reward or adjustment.
    RewardApplied {
        /// Account identifier.
        account_id: AccountId,
        /// Activity classifier; empty for bare adjustments.
        kind: String,
        /// Human-readable description; empty for bare adjustments.
        description: String,
        /// Xp credited.
        xp_delta: i64,
        /// Currency credited (negative for debits).
        currency_delta: i64,
        /// Balance after the mutation.
        balance: i64,
        /// Xp total after the mutation.
        xp: i64,
        /// Level after the mutation.
        level: u8,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a chance game writes its ticket.
    TicketDrawn {
        /// Account identifier.
        account_id: AccountId,
        /// Which game produced the ticket.
        game: ClaimKind,
        /// Outcome payload as returned to the client.
        result: serde_json::Value,
        /// Draw timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a wager is settled.
    WagerSettled {
        /// Account identifier.
        account_id: AccountId,
        /// Match the wager referenced.
        match_id: String,
        /// Side the user backed.
        selected_side: String,
        /// Side the draw picked.
        winning_side: String,
        /// Whether the user won.
        won: bool,
        /// Gross payout (zero on a loss).
        payout: i64,
        /// Settlement timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl AccountEvent {
    /// Returns the account this event belongs to.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        match self {
            Self::AccountCreated { account_id, .. }
            | Self::RewardApplied { account_id, .. }
            | Self::TicketDrawn { account_id, .. }
            | Self::WagerSettled { account_id, .. } => *account_id,
        }
    }

    /// Stable event-kind string, matching the serde tag and the WebSocket
    /// subscription keys.
    #[must_use]
    pub const fn event_kind_str(&self) -> &'static str {
        match self {
            Self::AccountCreated { .. } => "account_created",
            Self::RewardApplied { .. } => "reward_applied",
            Self::TicketDrawn { .. } => "ticket_drawn",
            Self::WagerSettled { .. } => "wager_settled",
        }
    }
}
