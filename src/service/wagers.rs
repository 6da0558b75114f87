//! Wager settlement: fixed-odds bet resolution.
//!
//! The winner is drawn uniformly between the two sides of the match; the
//! listed odds never bias the draw, they only scale the payout. This is
//! the portal's long-standing behavior and is preserved deliberately.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    AccountEvent, AccountRegistry, EventBus, MatchBook, Reward, SportsMatch,
};
use crate::error::PortalError;

/// Xp awarded for a winning wager.
const WIN_XP: i64 = 50;

/// Consolation xp for a losing wager.
const LOSS_XP: i64 = 10;

/// Result of one settled wager.
#[derive(Debug, Clone)]
pub struct WagerOutcome {
    /// Whether the backed side won.
    pub won: bool,
    /// Side the draw picked.
    pub winning_side: String,
    /// Gross payout, `floor(stake × odds)`; zero on a loss.
    pub payout: i64,
    /// Net balance change applied (`payout − stake`, or `−stake`).
    pub net: i64,
    /// Xp credited for the wager.
    pub xp_awarded: i64,
}

/// Fixed-odds wager settlement over the match catalog.
#[derive(Debug, Clone)]
pub struct WagerService {
    registry: Arc<AccountRegistry>,
    match_book: Arc<MatchBook>,
    event_bus: EventBus,
}

impl WagerService {
    /// Creates a new `WagerService`.
    #[must_use]
    pub fn new(
        registry: Arc<AccountRegistry>,
        match_book: Arc<MatchBook>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry,
            match_book,
            event_bus,
        }
    }

    /// All matches currently offered.
    #[must_use]
    pub fn matches(&self) -> &[SportsMatch] {
        self.match_book.list()
    }

    /// Settles a wager: debits the stake, draws a winner, credits the
    /// payout and xp through the reward engine, and logs one activity
    /// either way.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidRequest`] for a non-positive stake or a side
    /// that is not part of the match, [`PortalError::MatchNotFound`] for
    /// an unknown match, [`PortalError::InsufficientBalance`] when the
    /// stake exceeds the balance, [`PortalError::AccountNotFound`] before
    /// the first login.
    pub async fn settle(
        &self,
        name: &str,
        match_id: &str,
        selected_side: &str,
        stake: i64,
    ) -> Result<(WagerOutcome, SportsMatch), PortalError> {
        if stake <= 0 {
            return Err(PortalError::InvalidRequest(format!(
                "stake must be positive, got {stake}"
            )));
        }

        let sports_match = self
            .match_book
            .get(match_id)
            .cloned()
            .ok_or_else(|| PortalError::MatchNotFound(match_id.to_string()))?;

        if !sports_match.has_side(selected_side) {
            return Err(PortalError::InvalidRequest(format!(
                "{selected_side} is not playing in match {match_id}"
            )));
        }

        let entry_lock = self.registry.get_by_name(name).await?;
        let mut entry = entry_lock.write().await;

        if entry.balance < stake {
            return Err(PortalError::InsufficientBalance {
                required: stake,
                available: entry.balance,
            });
        }

        let winner_index = {
            use rand::Rng;
            let mut rng = rand::rng();
            rng.random_range(0..2usize)
        };
        let outcome = resolve(&sports_match, selected_side, stake, winner_index);

        let (kind, description) = if outcome.won {
            (
                "bet_won",
                format!("Won ${} betting on {selected_side}", outcome.net),
            )
        } else {
            (
                "bet_lost",
                format!("Lost ${stake} betting on {selected_side}"),
            )
        };
        entry.apply_reward(&Reward::new(
            outcome.xp_awarded,
            outcome.net,
            kind,
            description.as_str(),
        ));

        let account_id = entry.account_id;
        let (balance, xp, level) = (entry.balance, entry.xp, entry.level);
        drop(entry);

        let _ = self.event_bus.publish(AccountEvent::WagerSettled {
            account_id,
            match_id: sports_match.id.clone(),
            selected_side: selected_side.to_string(),
            winning_side: outcome.winning_side.clone(),
            won: outcome.won,
            payout: outcome.payout,
            timestamp: Utc::now(),
        });
        let _ = self.event_bus.publish(AccountEvent::RewardApplied {
            account_id,
            kind: kind.to_string(),
            description,
            xp_delta: outcome.xp_awarded,
            currency_delta: outcome.net,
            balance,
            xp,
            level,
            timestamp: Utc::now(),
        });

        tracing::info!(
            %account_id,
            match_id,
            selected_side,
            stake,
            won = outcome.won,
            payout = outcome.payout,
            "wager settled"
        );
        Ok((outcome, sports_match))
    }
}

/// Pure settlement math for a forced winner index (0 or 1).
///
/// Separated from [`WagerService::settle`] so tests can pin the draw.
fn resolve(
    sports_match: &SportsMatch,
    selected_side: &str,
    stake: i64,
    winner_index: usize,
) -> WagerOutcome {
    let [first, second] = &sports_match.teams;
    let winning_side = if winner_index == 0 { first } else { second };
    let won = winning_side == selected_side;

    if won {
        let odds = sports_match.odds_for(selected_side).unwrap_or(1.0);
        let payout = (stake as f64 * odds).floor() as i64;
        WagerOutcome {
            won,
            winning_side: winning_side.clone(),
            payout,
            net: payout - stake,
            xp_awarded: WIN_XP,
        }
    } else {
        WagerOutcome {
            won,
            winning_side: winning_side.clone(),
            payout: 0,
            net: -stake,
            xp_awarded: LOSS_XP,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AccountEntry, AccountId};
    use std::collections::HashMap;

    fn make_match() -> SportsMatch {
        let mut odds = HashMap::new();
        odds.insert("A".to_string(), 2.0);
        odds.insert("B".to_string(), 1.5);
        SportsMatch {
            id: "test-a-b".to_string(),
            teams: ["A".to_string(), "B".to_string()],
            sport: "Basketball".to_string(),
            match_time: Utc::now(),
            stadium: "Test Arena".to_string(),
            odds,
            status: "upcoming".to_string(),
            description: "test match".to_string(),
        }
    }

    async fn make_service(balance: i64) -> WagerService {
        let registry = Arc::new(AccountRegistry::new());
        let _ = registry
            .insert(AccountEntry::new(AccountId::new(), "portaluser", balance))
            .await;
        let book = Arc::new(MatchBook::new(vec![make_match()]));
        WagerService::new(registry, book, EventBus::new(1000))
    }

    #[test]
    fn resolve_win_pays_fixed_odds() {
        let m = make_match();
        let outcome = resolve(&m, "A", 100, 0);
        assert!(outcome.won);
        assert_eq!(outcome.winning_side, "A");
        assert_eq!(outcome.payout, 200);
        assert_eq!(outcome.net, 100);
        assert_eq!(outcome.xp_awarded, 50);
    }

    #[test]
    fn resolve_loss_forfeits_stake() {
        let m = make_match();
        let outcome = resolve(&m, "A", 100, 1);
        assert!(!outcome.won);
        assert_eq!(outcome.winning_side, "B");
        assert_eq!(outcome.payout, 0);
        assert_eq!(outcome.net, -100);
        assert_eq!(outcome.xp_awarded, 10);
    }

    #[test]
    fn resolve_floors_fractional_payouts() {
        let m = make_match();
        let outcome = resolve(&m, "B", 33, 1);
        assert!(outcome.won);
        // 33 × 1.5 = 49.5, floored.
        assert_eq!(outcome.payout, 49);
        assert_eq!(outcome.net, 16);
    }

    #[tokio::test]
    async fn settle_applies_net_change_and_logs() {
        let service = make_service(1000).await;

        let result = service.settle("portaluser", "test-a-b", "A", 100).await;
        let Ok((outcome, _)) = result else {
            panic!("settle failed");
        };

        let entry_lock = service.registry.get_by_name("portaluser").await;
        let Ok(entry_lock) = entry_lock else {
            panic!("account missing");
        };
        let entry = entry_lock.read().await;

        if outcome.won {
            assert_eq!(entry.balance, 1100);
            assert_eq!(entry.xp, 50);
        } else {
            assert_eq!(entry.balance, 900);
            assert_eq!(entry.xp, 10);
        }
        assert_eq!(entry.activity_count(), 1);
    }

    #[tokio::test]
    async fn stake_above_balance_is_rejected_unchanged() {
        let service = make_service(50).await;

        let result = service.settle("portaluser", "test-a-b", "A", 100).await;
        assert!(matches!(
            result,
            Err(PortalError::InsufficientBalance { required: 100, available: 50 })
        ));

        let entry_lock = service.registry.get_by_name("portaluser").await;
        let Ok(entry_lock) = entry_lock else {
            panic!("account missing");
        };
        let entry = entry_lock.read().await;
        assert_eq!(entry.balance, 50);
        assert_eq!(entry.activity_count(), 0);
    }

    #[tokio::test]
    async fn invalid_stake_and_unknown_match_fail() {
        let service = make_service(1000).await;

        let zero = service.settle("portaluser", "test-a-b", "A", 0).await;
        assert!(matches!(zero, Err(PortalError::InvalidRequest(_))));

        let missing = service.settle("portaluser", "nope", "A", 10).await;
        assert!(matches!(missing, Err(PortalError::MatchNotFound(_))));

        let wrong_side = service.settle("portaluser", "test-a-b", "C", 10).await;
        assert!(matches!(wrong_side, Err(PortalError::InvalidRequest(_))));
    }
}
