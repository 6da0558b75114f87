//! Account handlers: login, profile, activity feed, progress grants.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AccountDto, ActivityDto, LoginRequest, LoginResponse, ProgressRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PortalError};

/// `POST /auth/login` — Verify the portal password and resolve the account.
///
/// # Errors
///
/// Returns [`PortalError::Unauthorized`] on a password mismatch.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Account",
    summary = "Log in to the portal",
    description = "Verifies the portal password and returns the single portal account, creating it on first login.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login accepted", body = LoginResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let profile = state.economy.login(&state.account_name, &req.password).await?;

    Ok(Json(LoginResponse {
        account: AccountDto::from(profile),
        token: "authenticated".to_string(),
    }))
}

/// `GET /account` — Current account state.
///
/// # Errors
///
/// Returns [`PortalError::AccountNotFound`] before the first login.
#[utoipa::path(
    get,
    path = "/api/v1/account",
    tag = "Account",
    summary = "Get the account",
    description = "Returns the account's balance, xp, level, and the xp window of the current level.",
    responses(
        (status = 200, description = "Account state", body = AccountDto),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PortalError> {
    let profile = state.economy.profile(&state.account_name).await?;
    Ok(Json(AccountDto::from(profile)))
}

/// `GET /account/activities` — Recent activity feed.
///
/// # Errors
///
/// Returns [`PortalError::AccountNotFound`] before the first login.
#[utoipa::path(
    get,
    path = "/api/v1/account/activities",
    tag = "Account",
    summary = "List recent activities",
    description = "Returns the last 10 activity records, newest first.",
    responses(
        (status = 200, description = "Activity feed", body = Vec<ActivityDto>),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn get_activities(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PortalError> {
    let records = state.economy.activities(&state.account_name).await?;
    let feed: Vec<ActivityDto> = records.into_iter().map(ActivityDto::from).collect();
    Ok(Json(feed))
}

/// `POST /account/progress` — Apply a progress grant.
///
/// # Errors
///
/// Returns [`PortalError::AccountNotFound`] before the first login.
#[utoipa::path(
    post,
    path = "/api/v1/account/progress",
    tag = "Account",
    summary = "Apply a progress grant",
    description = "Credits xp and/or currency. The grant is logged to the activity feed only when both an activity type and a description are supplied.",
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Updated account state", body = AccountDto),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn apply_progress(
    State(state): State<AppState>,
    Json(req): Json<ProgressRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let activity = match (req.activity_type, req.description) {
        (Some(kind), Some(description)) => Some((kind, description)),
        _ => None,
    };

    let profile = state
        .economy
        .apply_progress(&state.account_name, req.xp_gain, req.dollar_gain, activity)
        .await?;

    Ok(Json(AccountDto::from(profile)))
}

/// Account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/account", get(get_account))
        .route("/account/activities", get(get_activities))
        .route("/account/progress", post(apply_progress))
}
