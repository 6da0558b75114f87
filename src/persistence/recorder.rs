//! Event-bus recorder: writes telemetry rows for domain events.
//!
//! Runs on its own task, consuming the broadcast bus. Every write is
//! best-effort: failures are logged and dropped, never propagated to
//! request handling. The in-memory registry stays authoritative.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::postgres::PortalPersistence;
use crate::domain::{AccountEvent, AccountRegistry, SequencedEvent};
use crate::error::PortalError;

/// Consumes the event bus until it closes, recording each event.
///
/// Tracks the stream sequence numbers so that any events dropped by the
/// broadcast ring buffer show up in the logs as a counted gap rather
/// than vanishing silently from the telemetry tables.
pub async fn run_recorder(
    persistence: PortalPersistence,
    registry: Arc<AccountRegistry>,
    mut rx: broadcast::Receiver<SequencedEvent>,
) {
    let mut last_seq: Option<u64> = None;

    loop {
        match rx.recv().await {
            Ok(SequencedEvent { seq, event }) => {
                if let Some(prev) = last_seq
                    && seq > prev + 1
                {
                    tracing::warn!(
                        missed = seq - prev - 1,
                        "gap in event stream, some telemetry rows were not written"
                    );
                }
                last_seq = Some(seq);

                if let Err(err) = record_event(&persistence, &registry, &event).await {
                    tracing::warn!(
                        seq,
                        event = event.event_kind_str(),
                        error = %err,
                        "telemetry write failed"
                    );
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "telemetry recorder lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    tracing::info!("telemetry recorder stopped");
}

/// Writes the rows for one event.
async fn record_event(
    persistence: &PortalPersistence,
    registry: &Arc<AccountRegistry>,
    event: &AccountEvent,
) -> Result<(), PortalError> {
    match event {
        AccountEvent::AccountCreated { account_id, .. } => {
            snapshot_account(persistence, registry, *account_id).await
        }
        AccountEvent::RewardApplied {
            account_id,
            kind,
            description,
            xp_delta,
            currency_delta,
            ..
        } => {
            // Bare adjustments carry an empty kind and stay out of the
            // activity table, mirroring the in-memory log.
            if !kind.is_empty() {
                let _ = persistence
                    .append_activity(
                        *account_id.as_uuid(),
                        kind,
                        description,
                        *xp_delta,
                        *currency_delta,
                    )
                    .await?;
            }
            snapshot_account(persistence, registry, *account_id).await
        }
        AccountEvent::TicketDrawn {
            account_id,
            game,
            result,
            ..
        } => {
            let _ = persistence
                .append_ticket(*account_id.as_uuid(), game.as_str(), result)
                .await?;
            Ok(())
        }
        // The settlement's balance effect arrives as a RewardApplied
        // event; nothing extra to store here.
        AccountEvent::WagerSettled { .. } => Ok(()),
    }
}

/// Upserts the current account state.
async fn snapshot_account(
    persistence: &PortalPersistence,
    registry: &Arc<AccountRegistry>,
    account_id: crate::domain::AccountId,
) -> Result<(), PortalError> {
    let entry_lock = registry.get(account_id).await?;
    let entry = entry_lock.read().await;
    let (name, balance, xp, level, created_at, last_login_at) = (
        entry.name.clone(),
        entry.balance,
        entry.xp,
        i16::from(entry.level),
        entry.created_at,
        entry.last_login_at,
    );
    drop(entry);

    persistence
        .upsert_account(
            *account_id.as_uuid(),
            &name,
            balance,
            xp,
            level,
            created_at,
            last_login_at,
        )
        .await
}
