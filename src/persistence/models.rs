//! Database models for account snapshots, activities, and tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account snapshot row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    /// Account identifier.
    pub id: Uuid,
    /// Login name.
    pub name: String,
    /// Currency balance.
    pub balance: i64,
    /// Accumulated xp.
    pub xp: i64,
    /// Level at snapshot time.
    pub level: i16,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Most recent login timestamp.
    pub last_login_at: DateTime<Utc>,
}

/// An activity row from the `activities` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Account the activity belongs to.
    pub account_id: Uuid,
    /// Activity classifier.
    pub kind: String,
    /// Human-readable description.
    pub description: String,
    /// Xp credited.
    pub xp_earned: i64,
    /// Currency credited (negative for debits).
    pub dollar_earned: i64,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A game-ticket row from the `game_tickets` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Account the ticket belongs to.
    pub account_id: Uuid,
    /// Game discriminator string (`"scratch"`, `"wheel"`, `"daily"`).
    pub game: String,
    /// Outcome payload as JSONB.
    pub result: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
