//! Economy service: login, profile reads, and progress grants.
//!
//! Orchestrates the reward engine for the non-game surfaces. Every
//! mutation follows the pattern: resolve account → acquire write lock →
//! mutate via the entry's reward engine → snapshot → publish event →
//! return.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::account::AccountProfile;
use crate::domain::{AccountEvent, AccountRegistry, ActivityRecord, EventBus, Reward};
use crate::error::PortalError;

/// Login, profile, activity-feed, and progress-grant operations.
#[derive(Debug, Clone)]
pub struct EconomyService {
    registry: Arc<AccountRegistry>,
    event_bus: EventBus,
    portal_password: String,
    starting_balance: i64,
}

impl EconomyService {
    /// Creates a new `EconomyService`.
    #[must_use]
    pub fn new(
        registry: Arc<AccountRegistry>,
        event_bus: EventBus,
        portal_password: impl Into<String>,
        starting_balance: i64,
    ) -> Self {
        Self {
            registry,
            event_bus,
            portal_password: portal_password.into(),
            starting_balance,
        }
    }

    /// Returns a reference to the inner [`AccountRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// Verifies the portal password and resolves the account, creating it
    /// lazily on first login.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Unauthorized`] on a password mismatch.
    pub async fn login(&self, name: &str, password: &str) -> Result<AccountProfile, PortalError> {
        if password != self.portal_password {
            return Err(PortalError::Unauthorized);
        }

        let (entry_lock, created) = self.registry.get_or_create(name, self.starting_balance).await;
        let mut entry = entry_lock.write().await;
        entry.touch_login();
        let profile = AccountProfile::from(&*entry);
        drop(entry);

        if created {
            let _ = self.event_bus.publish(AccountEvent::AccountCreated {
                account_id: profile.account_id,
                name: profile.name.clone(),
                timestamp: Utc::now(),
            });
            tracing::info!(account = %profile.account_id, name, "account created");
        }

        Ok(profile)
    }

    /// Returns the account's current economy state.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] before the first login.
    pub async fn profile(&self, name: &str) -> Result<AccountProfile, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        let entry = entry_lock.read().await;
        Ok(AccountProfile::from(&*entry))
    }

    /// Returns the most recent activity records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] before the first login.
    pub async fn activities(&self, name: &str) -> Result<Vec<ActivityRecord>, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        let entry = entry_lock.read().await;
        Ok(entry.recent_activities())
    }

    /// Applies a progress grant: xp and/or currency, with an activity
    /// record only when both a type and a description were supplied
    /// (description-less grants stay out of the audit feed).
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] before the first login.
    pub async fn apply_progress(
        &self,
        name: &str,
        xp_gain: i64,
        dollar_gain: i64,
        activity: Option<(String, String)>,
    ) -> Result<AccountProfile, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        let mut entry = entry_lock.write().await;

        let (kind, description) = match activity {
            Some((kind, description)) => {
                entry.apply_reward(&Reward::new(
                    xp_gain,
                    dollar_gain,
                    kind.as_str(),
                    description.as_str(),
                ));
                (kind, description)
            }
            None => {
                entry.adjust(xp_gain, dollar_gain);
                (String::new(), String::new())
            }
        };

        let profile = AccountProfile::from(&*entry);
        drop(entry);

        let _ = self.event_bus.publish(AccountEvent::RewardApplied {
            account_id: profile.account_id,
            kind,
            description,
            xp_delta: xp_gain,
            currency_delta: dollar_gain,
            balance: profile.balance,
            xp: profile.xp,
            level: profile.level,
            timestamp: Utc::now(),
        });

        Ok(profile)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_service() -> EconomyService {
        let registry = Arc::new(AccountRegistry::new());
        let event_bus = EventBus::new(1000);
        EconomyService::new(registry, event_bus, "sesame", 1000)
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let service = make_service();
        let result = service.login("portaluser", "nope").await;
        assert!(matches!(result, Err(PortalError::Unauthorized)));
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn first_login_creates_account_and_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus.subscribe();

        let profile = service.login("portaluser", "sesame").await;
        let Ok(profile) = profile else {
            panic!("login failed");
        };
        assert_eq!(profile.balance, 1000);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.seq, 1);
        assert_eq!(event.event.event_kind_str(), "account_created");

        // Second login resolves the same account without a new event.
        let again = service.login("portaluser", "sesame").await;
        let Ok(again) = again else {
            panic!("login failed");
        };
        assert_eq!(again.account_id, profile.account_id);
        assert_eq!(service.registry().len().await, 1);
    }

    #[tokio::test]
    async fn profile_before_login_is_not_found() {
        let service = make_service();
        let result = service.profile("portaluser").await;
        assert!(matches!(result, Err(PortalError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn progress_with_activity_updates_and_logs() {
        let service = make_service();
        let _ = service.login("portaluser", "sesame").await;

        let profile = service
            .apply_progress(
                "portaluser",
                100,
                50,
                Some(("news_read".to_string(), "Read an article".to_string())),
            )
            .await;
        let Ok(profile) = profile else {
            panic!("progress failed");
        };
        assert_eq!(profile.xp, 100);
        assert_eq!(profile.balance, 1050);
        assert_eq!(profile.level, 2);

        let activities = service.activities("portaluser").await;
        let Ok(activities) = activities else {
            panic!("activities failed");
        };
        assert_eq!(activities.len(), 1);
    }

    #[tokio::test]
    async fn progress_without_activity_skips_the_log() {
        let service = make_service();
        let _ = service.login("portaluser", "sesame").await;

        let _ = service.apply_progress("portaluser", 10, 0, None).await;

        let activities = service.activities("portaluser").await;
        let Ok(activities) = activities else {
            panic!("activities failed");
        };
        assert!(activities.is_empty());
    }

    #[tokio::test]
    async fn reads_do_not_mutate() {
        let service = make_service();
        let _ = service.login("portaluser", "sesame").await;

        for _ in 0..5 {
            let _ = service.profile("portaluser").await;
            let _ = service.activities("portaluser").await;
        }

        let profile = service.profile("portaluser").await;
        let Ok(profile) = profile else {
            panic!("profile failed");
        };
        assert_eq!(profile.balance, 1000);
        assert_eq!(profile.xp, 0);
    }
}
