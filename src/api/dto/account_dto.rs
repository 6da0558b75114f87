//! Account, login, progress, and activity DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AccountId;
use crate::domain::account::AccountProfile;
use crate::domain::activity::ActivityRecord;
use crate::domain::progression::xp_window;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Portal password.
    pub password: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// The resolved (possibly just-created) account.
    pub account: AccountDto,
    /// Fixed session sentinel; the portal has no token machinery.
    pub token: String,
}

/// The account's economy state as served to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Account identifier.
    pub account_id: AccountId,
    /// Login name.
    pub name: String,
    /// Currency balance.
    pub balance: i64,
    /// Accumulated xp.
    pub xp: i64,
    /// Current level (1–5).
    pub level: u8,
    /// Lower xp bound of the current level's window.
    pub xp_floor: i64,
    /// Upper xp bound of the current level's window, for progress bars.
    pub xp_ceiling: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Most recent login timestamp.
    pub last_login_at: DateTime<Utc>,
}

impl From<AccountProfile> for AccountDto {
    fn from(profile: AccountProfile) -> Self {
        let (xp_floor, xp_ceiling) = xp_window(profile.level);
        Self {
            account_id: profile.account_id,
            name: profile.name,
            balance: profile.balance,
            xp: profile.xp,
            level: profile.level,
            xp_floor,
            xp_ceiling,
            created_at: profile.created_at,
            last_login_at: profile.last_login_at,
        }
    }
}

/// Request body for `POST /account/progress`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    /// Xp to credit. Defaults to 0.
    #[serde(default)]
    pub xp_gain: i64,
    /// Currency to credit (may be negative). Defaults to 0.
    #[serde(default)]
    pub dollar_gain: i64,
    /// Activity classifier. The grant is logged only when this and
    /// `description` are both present.
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Human-readable activity description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One activity-feed entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    /// Activity classifier.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description.
    pub description: String,
    /// Xp credited.
    pub xp_earned: i64,
    /// Currency credited (negative for debits).
    pub dollar_earned: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRecord> for ActivityDto {
    fn from(record: ActivityRecord) -> Self {
        Self {
            kind: record.kind,
            description: record.description,
            xp_earned: record.xp_earned,
            dollar_earned: record.dollar_earned,
            created_at: record.created_at,
        }
    }
}
