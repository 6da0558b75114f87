//! Wager handlers: match catalog and bet settlement.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{MatchDto, WagerRequest, WagerResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PortalError};

/// `GET /matches` — List the match catalog.
#[utoipa::path(
    get,
    path = "/api/v1/matches",
    tag = "Wagers",
    summary = "List matches",
    description = "Returns the fixture matches currently offered for betting, with per-side payout odds.",
    responses(
        (status = 200, description = "Match catalog", body = Vec<MatchDto>),
    )
)]
pub async fn list_matches(State(state): State<AppState>) -> impl IntoResponse {
    let catalog: Vec<MatchDto> = state
        .wagers
        .matches()
        .iter()
        .cloned()
        .map(MatchDto::from)
        .collect();
    Json(catalog)
}

/// `POST /account/wagers` — Place and settle a wager.
///
/// # Errors
///
/// Returns [`PortalError`] on a non-positive stake, unknown match or
/// side, or insufficient balance.
#[utoipa::path(
    post,
    path = "/api/v1/account/wagers",
    tag = "Wagers",
    summary = "Place a wager",
    description = "Debits the stake, draws a winner uniformly between the two sides, and pays floor(stake × odds) on a win. Settlement is immediate.",
    request_body = WagerRequest,
    responses(
        (status = 200, description = "Settled wager", body = WagerResponse),
        (status = 400, description = "Invalid stake or insufficient balance", body = ErrorResponse),
        (status = 404, description = "Match or account not found", body = ErrorResponse),
    )
)]
pub async fn place_wager(
    State(state): State<AppState>,
    Json(req): Json<WagerRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let (outcome, sports_match) = state
        .wagers
        .settle(&state.account_name, &req.match_id, &req.selected_side, req.stake)
        .await?;

    Ok(Json(WagerResponse {
        user_won: outcome.won,
        winner: outcome.winning_side,
        winnings: outcome.payout,
        xp_gain: outcome.xp_awarded,
        selected_team: req.selected_side,
        sports_match: MatchDto::from(sports_match),
    }))
}

/// Wager routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/account/wagers", post(place_wager))
}
