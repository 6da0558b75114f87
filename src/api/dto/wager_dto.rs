//! Wager and match-catalog DTOs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SportsMatch;

/// Request body for `POST /account/wagers`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WagerRequest {
    /// Match to bet on.
    pub match_id: String,
    /// Side to back; must be one of the match's two teams.
    pub selected_side: String,
    /// Stake in currency units; must be positive.
    pub stake: i64,
}

/// One fixture match as served to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    /// Match identifier.
    pub id: String,
    /// The two sides.
    pub teams: Vec<String>,
    /// Sport label.
    pub sport: String,
    /// Scheduled start time.
    pub match_time: DateTime<Utc>,
    /// Venue label.
    pub stadium: String,
    /// Payout multiplier per side, keyed by team name.
    pub odds: HashMap<String, f64>,
    /// Listing status.
    pub status: String,
    /// Listing description.
    pub description: String,
}

impl From<SportsMatch> for MatchDto {
    fn from(m: SportsMatch) -> Self {
        Self {
            id: m.id,
            teams: m.teams.to_vec(),
            sport: m.sport,
            match_time: m.match_time,
            stadium: m.stadium,
            odds: m.odds,
            status: m.status,
            description: m.description,
        }
    }
}

/// Response body for `POST /account/wagers`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WagerResponse {
    /// Whether the backed side won.
    pub user_won: bool,
    /// Side the draw picked.
    pub winner: String,
    /// Gross payout; zero on a loss.
    pub winnings: i64,
    /// Xp credited for the wager.
    pub xp_gain: i64,
    /// Side the user backed.
    pub selected_team: String,
    /// The match the wager referenced.
    #[serde(rename = "match")]
    pub sports_match: MatchDto,
}
