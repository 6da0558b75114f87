//! Persistence layer: PostgreSQL telemetry sidecar.
//!
//! Stores account snapshots, activity rows, and game tickets. Writes are
//! driven by the event bus via [`recorder::run_recorder`] and are
//! best-effort telemetry — the in-memory [`crate::domain::AccountRegistry`]
//! remains authoritative.

pub mod models;
pub mod postgres;
pub mod recorder;

pub use postgres::PortalPersistence;
