//! Chance-game DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::chance::WheelPrize;
use crate::service::ScratchResult;

/// Response body for `POST /account/reward-actions/scratch`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScratchResponse {
    /// Whether the card won.
    pub won: bool,
    /// Payout in currency units; zero on a loss.
    pub amount: i64,
    /// Display label: `"$N"` on a win, a consolation otherwise.
    pub prize: String,
}

impl From<ScratchResult> for ScratchResponse {
    fn from(result: ScratchResult) -> Self {
        Self {
            won: result.won,
            amount: result.amount,
            prize: result.prize,
        }
    }
}

/// Response body for the wheel and check-in endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrizeResponse {
    /// Currency units won.
    pub amount: i64,
    /// Xp won.
    pub xp: i64,
    /// Display label for the prize.
    pub text: String,
}

impl From<WheelPrize> for PrizeResponse {
    fn from(prize: WheelPrize) -> Self {
        Self {
            amount: prize.amount,
            xp: prize.xp,
            text: prize.text.to_string(),
        }
    }
}
