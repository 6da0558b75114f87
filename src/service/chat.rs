//! Dating-chat service.
//!
//! Stores both sides of each exchange on the account and delegates reply
//! writing to the text-generation collaborator. Generation failures are
//! masked with a static fallback reply — no funds depend on generation
//! success, and the chat keeps flowing.

use std::sync::Arc;

use crate::domain::AccountRegistry;
use crate::domain::chat_message::ChatMessage;
use crate::error::PortalError;
use crate::textgen::TextGenerator;

/// Reply used when the collaborator is unavailable or not configured.
const FALLBACK_REPLY: &str =
    "Sorry, my connection is acting up right now — let's chat a little later!";

/// Dating-chat orchestration.
#[derive(Debug, Clone)]
pub struct ChatService {
    registry: Arc<AccountRegistry>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ChatService {
    /// Creates a new `ChatService`. With `generator` unset, every
    /// message is answered with the fallback reply.
    #[must_use]
    pub fn new(registry: Arc<AccountRegistry>, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            registry,
            generator,
        }
    }

    /// Handles one chat message: stores it, obtains a reply, stores the
    /// reply, and returns it.
    ///
    /// The generation call is awaited without any account lock held.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] before the first login.
    pub async fn send_message(
        &self,
        name: &str,
        profile_id: &str,
        message: &str,
    ) -> Result<String, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        {
            let mut entry = entry_lock.write().await;
            entry.push_chat_message(ChatMessage::new(profile_id, message, true));
        }

        let reply = match &self.generator {
            Some(generator) => {
                match generator.generate(&system_prompt(profile_id), message).await {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(profile_id, error = %err, "text generation failed, using fallback");
                        FALLBACK_REPLY.to_string()
                    }
                }
            }
            None => FALLBACK_REPLY.to_string(),
        };

        {
            let mut entry = entry_lock.write().await;
            entry.push_chat_message(ChatMessage::new(profile_id, reply.clone(), false));
        }

        Ok(reply)
    }

    /// All messages exchanged with one profile, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::AccountNotFound`] before the first login.
    pub async fn history(
        &self,
        name: &str,
        profile_id: &str,
    ) -> Result<Vec<ChatMessage>, PortalError> {
        let entry_lock = self.registry.get_by_name(name).await?;
        let entry = entry_lock.read().await;
        Ok(entry.chat_history(profile_id))
    }
}

/// Persona prompt for one dating profile.
fn system_prompt(profile_id: &str) -> String {
    format!(
        "You are {profile_id}, a friendly and upbeat person chatting on a \
         dating app. Reply in one or two short, warm sentences, like a real \
         conversation. Never mention being an AI."
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AccountEntry, AccountId};
    use crate::textgen::GenerationError;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _: &str, _: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Debug)]
    struct BrokenGenerator;

    #[async_trait]
    impl TextGenerator for BrokenGenerator {
        async fn generate(&self, _: &str, _: &str) -> Result<String, GenerationError> {
            Err(GenerationError::EmptyResponse)
        }
    }

    async fn make_registry() -> Arc<AccountRegistry> {
        let registry = Arc::new(AccountRegistry::new());
        let _ = registry
            .insert(AccountEntry::new(AccountId::new(), "portaluser", 1000))
            .await;
        registry
    }

    #[tokio::test]
    async fn stores_both_sides_of_the_exchange() {
        let registry = make_registry().await;
        let service = ChatService::new(registry, Some(Arc::new(FixedGenerator("hey you!"))));

        let reply = service.send_message("portaluser", "emma", "hi emma").await;
        let Ok(reply) = reply else {
            panic!("chat failed");
        };
        assert_eq!(reply, "hey you!");

        let history = service.history("portaluser", "emma").await;
        let Ok(history) = history else {
            panic!("history failed");
        };
        assert_eq!(history.len(), 2);
        let Some(first) = history.first() else {
            panic!("expected messages");
        };
        assert!(first.from_user);
        assert_eq!(first.body, "hi emma");
        let Some(second) = history.get(1) else {
            panic!("expected messages");
        };
        assert!(!second.from_user);
        assert_eq!(second.body, "hey you!");
    }

    #[tokio::test]
    async fn generator_failure_masks_to_fallback() {
        let registry = make_registry().await;
        let service = ChatService::new(registry, Some(Arc::new(BrokenGenerator)));

        let reply = service.send_message("portaluser", "emma", "hi").await;
        let Ok(reply) = reply else {
            panic!("chat failed");
        };
        assert_eq!(reply, FALLBACK_REPLY);

        // The fallback is stored like any generated reply.
        let history = service.history("portaluser", "emma").await;
        let Ok(history) = history else {
            panic!("history failed");
        };
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn no_generator_means_fallback() {
        let registry = make_registry().await;
        let service = ChatService::new(registry, None);

        let reply = service.send_message("portaluser", "emma", "hi").await;
        let Ok(reply) = reply else {
            panic!("chat failed");
        };
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn history_is_scoped_to_profile() {
        let registry = make_registry().await;
        let service = ChatService::new(registry, Some(Arc::new(FixedGenerator("hello"))));

        let _ = service.send_message("portaluser", "emma", "hi emma").await;
        let _ = service.send_message("portaluser", "lily", "hi lily").await;

        let history = service.history("portaluser", "emma").await;
        let Ok(history) = history else {
            panic!("history failed");
        };
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.profile_id == "emma"));
    }
}
