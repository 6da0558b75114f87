//! Account aggregate: economy state, audit logs, and the reward engine.
//!
//! [`AccountEntry`] is the single source of truth for one account. All of
//! its mutation methods run under the registry's per-account write lock,
//! so a balance/xp/level update and its activity-log append are applied
//! atomically with respect to other requests.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::AccountId;
use super::activity::ActivityRecord;
use super::chat_message::ChatMessage;
use super::progression::level_for_xp;
use super::reward::Reward;
use super::ticket::{ClaimKind, GameTicket};

/// How many activity entries list reads return.
pub const ACTIVITY_PAGE: usize = 10;

/// The portal account: balance, xp, derived level, and its audit trail.
#[derive(Debug)]
pub struct AccountEntry {
    /// Unique account identifier (immutable after creation).
    pub account_id: AccountId,

    /// Login name (immutable after creation).
    pub name: String,

    /// Currency balance in whole units. Negative balances are possible
    /// only through bare adjustments; well-formed flows guard first.
    pub balance: i64,

    /// Accumulated experience points. Never decremented.
    pub xp: i64,

    /// Current level, always `level_for_xp(xp)` after any mutation.
    pub level: u8,

    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent login.
    pub last_login_at: DateTime<Utc>,

    activities: Vec<ActivityRecord>,
    tickets: Vec<GameTicket>,
    chat_messages: Vec<ChatMessage>,
    last_claims: HashMap<ClaimKind, NaiveDate>,
}

impl AccountEntry {
    /// Creates a fresh account at level 1 with the given starting balance.
    #[must_use]
    pub fn new(account_id: AccountId, name: impl Into<String>, starting_balance: i64) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            name: name.into(),
            balance: starting_balance,
            xp: 0,
            level: 1,
            created_at: now,
            last_login_at: now,
            activities: Vec::new(),
            tickets: Vec::new(),
            chat_messages: Vec::new(),
            last_claims: HashMap::new(),
        }
    }

    /// Applies a reward: adds the deltas, recomputes the level, and
    /// appends exactly one activity record carrying the same deltas.
    ///
    /// The caller holds the entry's write lock, so the field updates and
    /// the log append land together.
    pub fn apply_reward(&mut self, reward: &Reward) {
        self.adjust(reward.xp_delta, reward.currency_delta);
        self.activities.push(ActivityRecord {
            kind: reward.kind.clone(),
            description: reward.description.clone(),
            xp_earned: reward.xp_delta,
            dollar_earned: reward.currency_delta,
            created_at: Utc::now(),
        });
    }

    /// Bare balance/xp adjustment with no activity record.
    ///
    /// Used for the scratch-card fee debit and for progress grants that
    /// arrive without an activity classification.
    pub fn adjust(&mut self, xp_delta: i64, currency_delta: i64) {
        self.xp += xp_delta;
        self.balance += currency_delta;
        self.level = level_for_xp(self.xp);
    }

    /// Returns up to [`ACTIVITY_PAGE`] activity records, newest first.
    #[must_use]
    pub fn recent_activities(&self) -> Vec<ActivityRecord> {
        self.activities
            .iter()
            .rev()
            .take(ACTIVITY_PAGE)
            .cloned()
            .collect()
    }

    /// Number of activity records ever written.
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Returns `true` if the daily gate for `kind` is open on `today`.
    #[must_use]
    pub fn claim_available(&self, kind: ClaimKind, today: NaiveDate) -> bool {
        self.last_claims.get(&kind) != Some(&today)
    }

    /// Marks the daily gate for `kind` as used on `today`.
    pub fn record_claim(&mut self, kind: ClaimKind, today: NaiveDate) {
        self.last_claims.insert(kind, today);
    }

    /// Appends a game ticket.
    pub fn push_ticket(&mut self, ticket: GameTicket) {
        self.tickets.push(ticket);
    }

    /// Most recent ticket of the given game, if any.
    #[must_use]
    pub fn last_ticket(&self, game: ClaimKind) -> Option<&GameTicket> {
        self.tickets.iter().rev().find(|t| t.game == game)
    }

    /// Appends a chat message.
    pub fn push_chat_message(&mut self, message: ChatMessage) {
        self.chat_messages.push(message);
    }

    /// All chat messages for one profile, oldest first.
    #[must_use]
    pub fn chat_history(&self, profile_id: &str) -> Vec<ChatMessage> {
        self.chat_messages
            .iter()
            .filter(|m| m.profile_id == profile_id)
            .cloned()
            .collect()
    }

    /// Stamps the login timestamp.
    pub fn touch_login(&mut self) {
        self.last_login_at = Utc::now();
    }
}

/// Lightweight snapshot of the account's economy state.
///
/// Taken under the entry lock and handed to DTO conversion so handlers
/// never hold the lock while serializing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AccountProfile {
    /// Account identifier.
    pub account_id: AccountId,
    /// Login name.
    pub name: String,
    /// Currency balance.
    pub balance: i64,
    /// Accumulated xp.
    pub xp: i64,
    /// Current level.
    pub level: u8,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Most recent login timestamp.
    pub last_login_at: DateTime<Utc>,
}

impl From<&AccountEntry> for AccountProfile {
    fn from(entry: &AccountEntry) -> Self {
        Self {
            account_id: entry.account_id,
            name: entry.name.clone(),
            balance: entry.balance,
            xp: entry.xp,
            level: entry.level,
            created_at: entry.created_at,
            last_login_at: entry.last_login_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_account() -> AccountEntry {
        AccountEntry::new(AccountId::new(), "portaluser", 1000)
    }

    #[test]
    fn apply_reward_updates_fields_and_logs_once() {
        let mut account = make_account();
        account.xp = 50;
        account.balance = 200;

        account.apply_reward(&Reward::new(100, 50, "news_read", "Read an article"));

        assert_eq!(account.xp, 150);
        assert_eq!(account.balance, 250);
        assert_eq!(account.level, 2);
        assert_eq!(account.activity_count(), 1);
        let activities = account.recent_activities();
        let Some(record) = activities.first() else {
            panic!("expected one activity");
        };
        assert_eq!(record.xp_earned, 100);
        assert_eq!(record.dollar_earned, 50);
        assert_eq!(record.kind, "news_read");
    }

    #[test]
    fn adjust_leaves_no_activity_record() {
        let mut account = make_account();
        account.adjust(0, -5);
        assert_eq!(account.balance, 995);
        assert_eq!(account.activity_count(), 0);
    }

    #[test]
    fn level_is_recomputed_on_every_mutation() {
        let mut account = make_account();
        account.level = 4; // stale stored value
        account.adjust(10, 0);
        assert_eq!(account.level, 1);

        account.apply_reward(&Reward::new(1000, 0, "grant", "big grant"));
        assert_eq!(account.level, 5);
    }

    #[test]
    fn recent_activities_newest_first_bounded_to_ten() {
        let mut account = make_account();
        for i in 0..15 {
            account.apply_reward(&Reward::new(i, 0, "grant", format!("grant {i}")));
        }

        let recent = account.recent_activities();
        assert_eq!(recent.len(), ACTIVITY_PAGE);
        let Some(first) = recent.first() else {
            panic!("expected records");
        };
        assert_eq!(first.description, "grant 14");
        let Some(last) = recent.last() else {
            panic!("expected records");
        };
        assert_eq!(last.description, "grant 5");
    }

    #[test]
    fn daily_gate_closes_for_the_day_and_reopens_after() {
        let mut account = make_account();
        let Some(today) = NaiveDate::from_ymd_opt(2025, 6, 1) else {
            panic!("valid date");
        };
        let Some(tomorrow) = NaiveDate::from_ymd_opt(2025, 6, 2) else {
            panic!("valid date");
        };

        assert!(account.claim_available(ClaimKind::Wheel, today));
        account.record_claim(ClaimKind::Wheel, today);
        assert!(!account.claim_available(ClaimKind::Wheel, today));
        assert!(account.claim_available(ClaimKind::Wheel, tomorrow));
    }

    #[test]
    fn daily_gates_are_independent_per_kind() {
        let mut account = make_account();
        let Some(today) = NaiveDate::from_ymd_opt(2025, 6, 1) else {
            panic!("valid date");
        };

        account.record_claim(ClaimKind::Wheel, today);
        assert!(account.claim_available(ClaimKind::Daily, today));
    }

    #[test]
    fn last_ticket_finds_newest_of_kind() {
        let mut account = make_account();
        account.push_ticket(GameTicket::new(
            ClaimKind::Scratch,
            serde_json::json!({"won": false}),
        ));
        account.push_ticket(GameTicket::new(
            ClaimKind::Wheel,
            serde_json::json!({"amount": 25}),
        ));
        account.push_ticket(GameTicket::new(
            ClaimKind::Scratch,
            serde_json::json!({"won": true}),
        ));

        let Some(ticket) = account.last_ticket(ClaimKind::Scratch) else {
            panic!("expected a scratch ticket");
        };
        assert_eq!(ticket.result["won"], true);
    }

    #[test]
    fn chat_history_filters_by_profile_oldest_first() {
        let mut account = make_account();
        account.push_chat_message(ChatMessage::new("emma", "hi", true));
        account.push_chat_message(ChatMessage::new("lily", "hello", true));
        account.push_chat_message(ChatMessage::new("emma", "hey there", false));

        let history = account.chat_history("emma");
        assert_eq!(history.len(), 2);
        let Some(first) = history.first() else {
            panic!("expected messages");
        };
        assert!(first.from_user);
        let Some(second) = history.get(1) else {
            panic!("expected messages");
        };
        assert!(!second.from_user);
    }
}
