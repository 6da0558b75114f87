//! REST endpoint handlers organized by resource.

pub mod account;
pub mod chat;
pub mod games;
pub mod system;
pub mod wagers;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(account::routes())
        .merge(games::routes())
        .merge(wagers::routes())
        .merge(chat::routes())
}
