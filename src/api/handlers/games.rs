//! Chance-game handlers: scratch card, spin wheel, daily check-in.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{PrizeResponse, ScratchResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PortalError};

/// `POST /account/reward-actions/scratch` — Play one scratch card.
///
/// # Errors
///
/// Returns [`PortalError::InsufficientBalance`] when the balance does not
/// cover the fee.
#[utoipa::path(
    post,
    path = "/api/v1/account/reward-actions/scratch",
    tag = "Games",
    summary = "Play a scratch card",
    description = "Charges the fixed fee, draws the card, and credits the payout on a win. No daily limit.",
    responses(
        (status = 200, description = "Card result", body = ScratchResponse),
        (status = 400, description = "Insufficient balance", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn scratch(State(state): State<AppState>) -> Result<impl IntoResponse, PortalError> {
    let result = state.games.scratch(&state.account_name).await?;
    Ok(Json(ScratchResponse::from(result)))
}

/// `POST /account/reward-actions/wheel` — Spin the lucky wheel.
///
/// # Errors
///
/// Returns [`PortalError::AlreadyClaimedToday`] on a repeat same-day spin.
#[utoipa::path(
    post,
    path = "/api/v1/account/reward-actions/wheel",
    tag = "Games",
    summary = "Spin the lucky wheel",
    description = "Free spin, once per UTC calendar day. The prize is drawn uniformly from a fixed six-entry table.",
    responses(
        (status = 200, description = "Wheel prize", body = PrizeResponse),
        (status = 400, description = "Already claimed today", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn wheel(State(state): State<AppState>) -> Result<impl IntoResponse, PortalError> {
    let prize = state.games.wheel(&state.account_name).await?;
    Ok(Json(PrizeResponse::from(prize)))
}

/// `POST /account/reward-actions/checkin` — Claim the daily check-in.
///
/// # Errors
///
/// Returns [`PortalError::AlreadyClaimedToday`] on a repeat same-day claim.
#[utoipa::path(
    post,
    path = "/api/v1/account/reward-actions/checkin",
    tag = "Games",
    summary = "Claim the daily check-in bonus",
    description = "Fixed reward, once per UTC calendar day, gated independently of the wheel.",
    responses(
        (status = 200, description = "Check-in reward", body = PrizeResponse),
        (status = 400, description = "Already claimed today", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn checkin(State(state): State<AppState>) -> Result<impl IntoResponse, PortalError> {
    let reward = state.games.checkin(&state.account_name).await?;
    Ok(Json(PrizeResponse::from(reward)))
}

/// Chance-game routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account/reward-actions/scratch", post(scratch))
        .route("/account/reward-actions/wheel", post(wheel))
        .route("/account/reward-actions/checkin", post(checkin))
}
