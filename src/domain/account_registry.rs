//! Concurrent account storage with per-account fine-grained locking.
//!
//! [`AccountRegistry`] stores all accounts in a `HashMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. The
//! portal is single-tenant in practice — the HTTP boundary always
//! resolves the one configured account name — but the registry itself is
//! keyed by [`AccountId`] so that assumption stays at the boundary.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::AccountId;
use super::account::AccountEntry;
use crate::error::PortalError;

/// Central store for all portal accounts.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<AccountEntry>>` for fine-grained per-account locking, plus
/// a name index for boundary lookups.
///
/// # Concurrency
///
/// - Multiple tasks may read the same account concurrently.
/// - Writes to different accounts are concurrent.
/// - Writes to the same account are serialized.
#[derive(Debug)]
pub struct AccountRegistry {
    accounts: RwLock<HashMap<AccountId, Arc<RwLock<AccountEntry>>>>,
    names: RwLock<HashMap<String, AccountId>>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            names: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new account entry into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if an account with the same
    /// name already exists.
    pub async fn insert(&self, entry: AccountEntry) -> Result<AccountId, PortalError> {
        let account_id = entry.account_id;
        let name = entry.name.clone();

        let mut names = self.names.write().await;
        if names.contains_key(&name) {
            return Err(PortalError::InvalidRequest(format!(
                "account {name} already exists"
            )));
        }

        let mut map = self.accounts.write().await;
        map.insert(account_id, Arc::new(RwLock::new(entry)));
        names.insert(name, account_id);
        Ok(account_id)
    }

    /// Returns a shared reference to the account entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] if no account with the
    /// given id exists.
    pub async fn get(&self, account_id: AccountId) -> Result<Arc<RwLock<AccountEntry>>, PortalError> {
        let map = self.accounts.read().await;
        map.get(&account_id)
            .cloned()
            .ok_or_else(|| PortalError::AccountNotFound(account_id.to_string()))
    }

    /// Resolves an account by name.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] if no account with the
    /// given name exists.
    pub async fn get_by_name(&self, name: &str) -> Result<Arc<RwLock<AccountEntry>>, PortalError> {
        let id = {
            let names = self.names.read().await;
            names
                .get(name)
                .copied()
                .ok_or_else(|| PortalError::AccountNotFound(name.to_string()))?
        };
        self.get(id).await
    }

    /// Resolves an account by name, creating it lazily if absent.
    ///
    /// Holds the name index lock across the check and insert, so two
    /// concurrent logins for the same name resolve to one account.
    /// Returns the entry and whether it was created by this call.
    pub async fn get_or_create(
        &self,
        name: &str,
        starting_balance: i64,
    ) -> (Arc<RwLock<AccountEntry>>, bool) {
        let mut names = self.names.write().await;
        if let Some(id) = names.get(name).copied() {
            let map = self.accounts.read().await;
            if let Some(arc) = map.get(&id) {
                return (Arc::clone(arc), false);
            }
        }

        let entry = AccountEntry::new(AccountId::new(), name, starting_balance);
        let id = entry.account_id;
        let arc = Arc::new(RwLock::new(entry));
        self.accounts.write().await.insert(id, Arc::clone(&arc));
        names.insert(name.to_string(), id);
        (arc, true)
    }

    /// Returns the number of accounts in the registry.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns `true` if the registry contains no accounts.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_entry(name: &str) -> AccountEntry {
        AccountEntry::new(AccountId::new(), name, 1000)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = AccountRegistry::new();
        let entry = make_entry("portaluser");
        let id = entry.account_id;

        let result = registry.insert(entry).await;
        assert!(result.is_ok());

        let fetched = registry.get(id).await;
        assert!(fetched.is_ok());
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let registry = AccountRegistry::new();
        let result = registry.get(AccountId::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn get_by_name_resolves() {
        let registry = AccountRegistry::new();
        let entry = make_entry("portaluser");
        let id = entry.account_id;
        let _ = registry.insert(entry).await;

        let fetched = registry.get_by_name("portaluser").await;
        let Ok(fetched) = fetched else {
            panic!("expected account");
        };
        assert_eq!(fetched.read().await.account_id, id);

        assert!(registry.get_by_name("nobody").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let registry = AccountRegistry::new();
        let _ = registry.insert(make_entry("portaluser")).await;
        let result = registry.insert(make_entry("portaluser")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn get_or_create_is_lazy_and_idempotent() {
        let registry = AccountRegistry::new();

        let (first, created) = registry.get_or_create("portaluser", 1000).await;
        assert!(created);
        assert_eq!(first.read().await.balance, 1000);

        let (second, created_again) = registry.get_or_create("portaluser", 1000).await;
        assert!(!created_again);
        assert_eq!(
            first.read().await.account_id,
            second.read().await.account_id
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = AccountRegistry::new();
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);

        let _ = registry.insert(make_entry("portaluser")).await;
        assert!(!registry.is_empty().await);
        assert_eq!(registry.len().await, 1);
    }
}
