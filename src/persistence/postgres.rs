//! PostgreSQL implementation of the telemetry sidecar.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::{AccountRow, ActivityRow, TicketRow};
use crate::config::PortalConfig;
use crate::error::PortalError;

/// PostgreSQL-backed telemetry store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PortalPersistence {
    pool: PgPool,
}

impl PortalPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL using the configured pool settings.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] when the database is
    /// unreachable.
    pub async fn connect(config: &PortalConfig) -> Result<Self, PortalError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Creates the telemetry tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), PortalError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (\
                 id UUID PRIMARY KEY, \
                 name TEXT NOT NULL UNIQUE, \
                 balance BIGINT NOT NULL, \
                 xp BIGINT NOT NULL, \
                 level SMALLINT NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL, \
                 last_login_at TIMESTAMPTZ NOT NULL\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS activities (\
                 id BIGSERIAL PRIMARY KEY, \
                 account_id UUID NOT NULL, \
                 kind TEXT NOT NULL, \
                 description TEXT NOT NULL, \
                 xp_earned BIGINT NOT NULL DEFAULT 0, \
                 dollar_earned BIGINT NOT NULL DEFAULT 0, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS game_tickets (\
                 id BIGSERIAL PRIMARY KEY, \
                 account_id UUID NOT NULL, \
                 game TEXT NOT NULL, \
                 result JSONB, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Upserts an account snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_account(
        &self,
        id: Uuid,
        name: &str,
        balance: i64,
        xp: i64,
        level: i16,
        created_at: DateTime<Utc>,
        last_login_at: DateTime<Utc>,
    ) -> Result<(), PortalError> {
        sqlx::query(
            "INSERT INTO users (id, name, balance, xp, level, created_at, last_login_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                 balance = EXCLUDED.balance, \
                 xp = EXCLUDED.xp, \
                 level = EXCLUDED.level, \
                 last_login_at = EXCLUDED.last_login_at",
        )
        .bind(id)
        .bind(name)
        .bind(balance)
        .bind(xp)
        .bind(level)
        .bind(created_at)
        .bind(last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Appends an activity row.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn append_activity(
        &self,
        account_id: Uuid,
        kind: &str,
        description: &str,
        xp_earned: i64,
        dollar_earned: i64,
    ) -> Result<i64, PortalError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO activities (account_id, kind, description, xp_earned, dollar_earned) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(account_id)
        .bind(kind)
        .bind(description)
        .bind(xp_earned)
        .bind(dollar_earned)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Appends a game-ticket row.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn append_ticket(
        &self,
        account_id: Uuid,
        game: &str,
        result: &serde_json::Value,
    ) -> Result<i64, PortalError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO game_tickets (account_id, game, result) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(account_id)
        .bind(game)
        .bind(result)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads the stored account snapshot by name, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn load_account(&self, name: &str) -> Result<Option<AccountRow>, PortalError> {
        let row = sqlx::query_as::<_, (Uuid, String, i64, i64, i16, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT id, name, balance, xp, level, created_at, last_login_at \
             FROM users WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(row.map(
            |(id, name, balance, xp, level, created_at, last_login_at)| AccountRow {
                id,
                name,
                balance,
                xp,
                level,
                created_at,
                last_login_at,
            },
        ))
    }

    /// Loads the most recent ticket of one game for an account, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn last_ticket(
        &self,
        account_id: Uuid,
        game: &str,
    ) -> Result<Option<TicketRow>, PortalError> {
        let row = sqlx::query_as::<_, (i64, Uuid, String, serde_json::Value, DateTime<Utc>)>(
            "SELECT id, account_id, game, result, created_at FROM game_tickets \
             WHERE account_id = $1 AND game = $2 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(account_id)
        .bind(game)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(row.map(|(id, account_id, game, result, created_at)| TicketRow {
            id,
            account_id,
            game,
            result,
            created_at,
        }))
    }

    /// Loads the most recent activity rows for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::PersistenceError`] on database failure.
    pub async fn recent_activities(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityRow>, PortalError> {
        let rows = sqlx::query_as::<_, (i64, Uuid, String, String, i64, i64, DateTime<Utc>)>(
            "SELECT id, account_id, kind, description, xp_earned, dollar_earned, created_at \
             FROM activities WHERE account_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortalError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, account_id, kind, description, xp_earned, dollar_earned, created_at)| {
                    ActivityRow {
                        id,
                        account_id,
                        kind,
                        description,
                        xp_earned,
                        dollar_earned,
                        created_at,
                    }
                },
            )
            .collect())
    }
}
