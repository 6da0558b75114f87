//! Reward value object.
//!
//! A [`Reward`] is the common currency between the chance games, the wager
//! settlement, and the reward engine: an xp delta, a currency delta, and
//! the audit-log classification for the action that earned it.

/// A pending reward to be applied to an account.
///
/// `xp_delta` is expected to be non-negative (xp is never decremented in
/// normal play) but this is not validated. `currency_delta` may be
/// negative, e.g. a lost wager.
#[derive(Debug, Clone)]
pub struct Reward {
    /// Experience points to add.
    pub xp_delta: i64,
    /// Currency units to add (may be negative).
    pub currency_delta: i64,
    /// Activity classifier, e.g. `"wheel_spin"`, `"bet_won"`.
    pub kind: String,
    /// Human-readable description for the activity log.
    pub description: String,
}

impl Reward {
    /// Creates a new reward.
    #[must_use]
    pub fn new(
        xp_delta: i64,
        currency_delta: i64,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            xp_delta,
            currency_delta,
            kind: kind.into(),
            description: description.into(),
        }
    }
}
