//! Immutable activity-log entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of the account's append-only activity log.
///
/// Created by the reward engine, never mutated or deleted. Read back
/// newest-first, bounded to the last 10 entries.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityRecord {
    /// Activity classifier, e.g. `"daily_checkin"`, `"lottery_win"`.
    pub kind: String,
    /// Human-readable description of the event.
    pub description: String,
    /// Xp credited by this event.
    pub xp_earned: i64,
    /// Currency credited (or debited, if negative) by this event.
    pub dollar_earned: i64,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
