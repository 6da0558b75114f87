//! Chance-game tickets and the daily-claim calendar boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Discriminator for the three chance games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// Paid scratch card, no daily gate.
    Scratch,
    /// Free spin wheel, once per calendar day.
    Wheel,
    /// Free daily check-in, once per calendar day.
    Daily,
}

impl ClaimKind {
    /// Stable string form, used in tickets, events, and persistence rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scratch => "scratch",
            Self::Wheel => "wheel",
            Self::Daily => "daily",
        }
    }
}

/// Immutable record of one chance-game invocation.
///
/// Written on every draw, independent of the activity log, for gating
/// audit and outcome history.
#[derive(Debug, Clone, Serialize)]
pub struct GameTicket {
    /// Which game produced this ticket.
    pub game: ClaimKind,
    /// Outcome payload as returned to the client.
    pub result: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl GameTicket {
    /// Creates a ticket stamped with the current time.
    #[must_use]
    pub fn new(game: ClaimKind, result: serde_json::Value) -> Self {
        Self {
            game,
            result,
            created_at: Utc::now(),
        }
    }
}

/// The current calendar day at the UTC midnight boundary.
///
/// Single definition of "today" for all daily gates. The gate compares
/// the account's recorded claim date for a [`ClaimKind`] against this.
#[must_use]
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_kind_strings_are_stable() {
        assert_eq!(ClaimKind::Scratch.as_str(), "scratch");
        assert_eq!(ClaimKind::Wheel.as_str(), "wheel");
        assert_eq!(ClaimKind::Daily.as_str(), "daily");
    }

    #[test]
    fn ticket_carries_payload() {
        let ticket = GameTicket::new(ClaimKind::Wheel, serde_json::json!({"amount": 25}));
        assert_eq!(ticket.game, ClaimKind::Wheel);
        assert_eq!(ticket.result["amount"], 25);
    }
}
