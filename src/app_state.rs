//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{ChatService, EconomyService, GamesService, WagerService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// `account_name` is the single-tenant boundary: every handler resolves
/// this one configured account, while the services and registry stay
/// keyed by account identity.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Login, profile, and progress operations.
    pub economy: Arc<EconomyService>,
    /// Chance-game operations.
    pub games: Arc<GamesService>,
    /// Wager settlement and match catalog.
    pub wagers: Arc<WagerService>,
    /// Dating-chat operations.
    pub chat: Arc<ChatService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Name of the portal's single account.
    pub account_name: Arc<str>,
}
