//! Chance-games service: scratch card, spin wheel, daily check-in.
//!
//! Orchestrates the pure draw functions from [`crate::domain::chance`]:
//! fee charging, daily gating, reward application, ticket recording, and
//! event publication. All account mutations for one draw happen under a
//! single write-lock acquisition; RNG use stays inside synchronous
//! scopes.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::chance::{
    DAILY_CHECKIN, SCRATCH_FEE, SCRATCH_WIN_XP, WheelPrize, draw_scratch, draw_wheel,
};
use crate::domain::ticket::utc_today;
use crate::domain::{
    AccountEvent, AccountRegistry, ClaimKind, EventBus, GameTicket, Reward,
};
use crate::error::PortalError;

/// Outcome of a scratch-card play, as returned to the client.
#[derive(Debug, Clone)]
pub struct ScratchResult {
    /// Whether the card won.
    pub won: bool,
    /// Payout in currency units; zero on a loss.
    pub amount: i64,
    /// Display label: the payout on a win, a consolation otherwise.
    pub prize: String,
}

/// Chance-game orchestration.
#[derive(Debug, Clone)]
pub struct GamesService {
    registry: Arc<AccountRegistry>,
    event_bus: EventBus,
}

impl GamesService {
    /// Creates a new `GamesService`.
    #[must_use]
    pub fn new(registry: Arc<AccountRegistry>, event_bus: EventBus) -> Self {
        Self {
            registry,
            event_bus,
        }
    }

    /// Plays one scratch card.
    ///
    /// The fee is charged up front; a win credits the payout and
    /// [`SCRATCH_WIN_XP`] through the reward engine. Losses leave only
    /// the fee debit — no activity record, matching the portal's
    /// long-standing behavior.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InsufficientBalance`] when the balance does
    /// not cover the fee, [`PortalError::AccountNotFound`] before the
    /// first login.
    pub async fn scratch(&self, name: &str) -> Result<ScratchResult, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        let mut entry = entry_lock.write().await;

        if entry.balance < SCRATCH_FEE {
            return Err(PortalError::InsufficientBalance {
                required: SCRATCH_FEE,
                available: entry.balance,
            });
        }
        entry.adjust(0, -SCRATCH_FEE);

        let outcome = {
            let mut rng = rand::rng();
            draw_scratch(&mut rng)
        };

        let prize = if outcome.won {
            format!("${}", outcome.amount)
        } else {
            "Better luck next time".to_string()
        };
        let result = ScratchResult {
            won: outcome.won,
            amount: outcome.amount,
            prize,
        };
        let payload = serde_json::json!({
            "won": result.won,
            "amount": result.amount,
            "prize": result.prize,
        });

        if outcome.won {
            entry.apply_reward(&Reward::new(
                SCRATCH_WIN_XP,
                outcome.amount,
                "lottery_win",
                format!("Scratch card win ${}", outcome.amount),
            ));
        }
        entry.push_ticket(GameTicket::new(ClaimKind::Scratch, payload.clone()));

        let account_id = entry.account_id;
        let (balance, xp, level) = (entry.balance, entry.xp, entry.level);
        drop(entry);

        let _ = self.event_bus.publish(AccountEvent::TicketDrawn {
            account_id,
            game: ClaimKind::Scratch,
            result: payload,
            timestamp: Utc::now(),
        });
        if outcome.won {
            let _ = self.event_bus.publish(AccountEvent::RewardApplied {
                account_id,
                kind: "lottery_win".to_string(),
                description: format!("Scratch card win ${}", outcome.amount),
                xp_delta: SCRATCH_WIN_XP,
                currency_delta: outcome.amount,
                balance,
                xp,
                level,
                timestamp: Utc::now(),
            });
        }

        tracing::debug!(%account_id, won = outcome.won, amount = outcome.amount, "scratch card played");
        Ok(result)
    }

    /// Spins the lucky wheel. Free, once per UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AlreadyClaimedToday`] on a repeat same-day
    /// spin, [`PortalError::AccountNotFound`] before the first login.
    pub async fn wheel(&self, name: &str) -> Result<WheelPrize, PortalError> {
        let prize = {
            let mut rng = rand::rng();
            draw_wheel(&mut rng)
        };
        self.claim_daily(
            name,
            ClaimKind::Wheel,
            prize,
            "wheel_spin",
            format!("Lucky wheel prize: {}", prize.text),
        )
        .await?;
        Ok(prize)
    }

    /// Claims the daily check-in bonus. Free, once per UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AlreadyClaimedToday`] on a repeat same-day
    /// claim, [`PortalError::AccountNotFound`] before the first login.
    pub async fn checkin(&self, name: &str) -> Result<WheelPrize, PortalError> {
        self.claim_daily(
            name,
            ClaimKind::Daily,
            DAILY_CHECKIN,
            "daily_checkin",
            "Daily check-in".to_string(),
        )
        .await?;
        Ok(DAILY_CHECKIN)
    }

    /// Shared path for the two daily-gated games: gate check, reward,
    /// claim stamp, and ticket — all under one lock.
    async fn claim_daily(
        &self,
        name: &str,
        game: ClaimKind,
        prize: WheelPrize,
        kind: &str,
        description: String,
    ) -> Result<(), PortalError> {
        let today = utc_today();
        let entry_lock = self.registry.get_by_name(name).await?;
        let mut entry = entry_lock.write().await;

        if !entry.claim_available(game, today) {
            return Err(PortalError::AlreadyClaimedToday(game.as_str()));
        }

        entry.apply_reward(&Reward::new(prize.xp, prize.amount, kind, description.as_str()));
        entry.record_claim(game, today);

        let payload = serde_json::json!({
            "amount": prize.amount,
            "xp": prize.xp,
            "text": prize.text,
        });
        entry.push_ticket(GameTicket::new(game, payload.clone()));

        let account_id = entry.account_id;
        let (balance, xp, level) = (entry.balance, entry.xp, entry.level);
        drop(entry);

        let _ = self.event_bus.publish(AccountEvent::TicketDrawn {
            account_id,
            game,
            result: payload,
            timestamp: Utc::now(),
        });
        let _ = self.event_bus.publish(AccountEvent::RewardApplied {
            account_id,
            kind: kind.to_string(),
            description,
            xp_delta: prize.xp,
            currency_delta: prize.amount,
            balance,
            xp,
            level,
            timestamp: Utc::now(),
        });

        tracing::debug!(%account_id, game = game.as_str(), amount = prize.amount, "daily game claimed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AccountEntry;
    use crate::domain::AccountId;

    async fn make_service(starting_balance: i64) -> GamesService {
        let registry = Arc::new(AccountRegistry::new());
        let _ = registry
            .insert(AccountEntry::new(
                AccountId::new(),
                "portaluser",
                starting_balance,
            ))
            .await;
        GamesService::new(registry, EventBus::new(1000))
    }

    async fn account_state(service: &GamesService, name: &str) -> (i64, i64, usize) {
        let entry_lock = service.registry.get_by_name(name).await;
        let Ok(entry_lock) = entry_lock else {
            panic!("account missing");
        };
        let entry = entry_lock.read().await;
        (entry.balance, entry.xp, entry.activity_count())
    }

    #[tokio::test]
    async fn scratch_with_insufficient_balance_fails_and_charges_nothing() {
        let service = make_service(3).await;

        let result = service.scratch("portaluser").await;
        assert!(matches!(
            result,
            Err(PortalError::InsufficientBalance { required: 5, available: 3 })
        ));

        let (balance, _, activities) = account_state(&service, "portaluser").await;
        assert_eq!(balance, 3);
        assert_eq!(activities, 0);
    }

    #[tokio::test]
    async fn scratch_always_charges_fee_and_records_ticket() {
        let service = make_service(1000).await;

        let result = service.scratch("portaluser").await;
        let Ok(result) = result else {
            panic!("scratch failed");
        };

        let entry_lock = service.registry.get_by_name("portaluser").await;
        let Ok(entry_lock) = entry_lock else {
            panic!("account missing");
        };
        let entry = entry_lock.read().await;

        if result.won {
            assert!((10..=1009).contains(&result.amount));
            assert_eq!(entry.balance, 1000 - SCRATCH_FEE + result.amount);
            assert_eq!(entry.xp, SCRATCH_WIN_XP);
            assert_eq!(entry.activity_count(), 1);
        } else {
            // Losses debit the fee silently: no activity record.
            assert_eq!(entry.balance, 1000 - SCRATCH_FEE);
            assert_eq!(entry.xp, 0);
            assert_eq!(entry.activity_count(), 0);
        }

        let Some(ticket) = entry.last_ticket(ClaimKind::Scratch) else {
            panic!("expected a ticket");
        };
        assert_eq!(ticket.result["won"], result.won);
    }

    #[tokio::test]
    async fn scratch_has_no_daily_gate() {
        let service = make_service(10_000).await;
        for _ in 0..5 {
            let result = service.scratch("portaluser").await;
            assert!(result.is_ok());
        }
    }

    #[tokio::test]
    async fn wheel_gates_to_once_per_day() {
        let service = make_service(1000).await;

        let first = service.wheel("portaluser").await;
        let Ok(prize) = first else {
            panic!("first spin failed");
        };
        assert!(crate::domain::chance::WHEEL_PRIZES.contains(&prize));

        let second = service.wheel("portaluser").await;
        assert!(matches!(
            second,
            Err(PortalError::AlreadyClaimedToday("wheel"))
        ));

        let (balance, xp, activities) = account_state(&service, "portaluser").await;
        assert_eq!(balance, 1000 + prize.amount);
        assert_eq!(xp, prize.xp);
        assert_eq!(activities, 1);
    }

    #[tokio::test]
    async fn checkin_gates_independently_of_wheel() {
        let service = make_service(1000).await;

        let _ = service.wheel("portaluser").await;

        let checkin = service.checkin("portaluser").await;
        let Ok(reward) = checkin else {
            panic!("check-in failed");
        };
        assert_eq!(reward.amount, 20);
        assert_eq!(reward.xp, 15);

        let again = service.checkin("portaluser").await;
        assert!(matches!(
            again,
            Err(PortalError::AlreadyClaimedToday("daily"))
        ));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let service = make_service(1000).await;
        let result = service.wheel("nobody").await;
        assert!(matches!(result, Err(PortalError::AccountNotFound(_))));
    }
}
