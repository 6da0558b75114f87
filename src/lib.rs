//! # portal-gateway
//!
//! REST API and WebSocket gateway for a gamified lifestyle portal's
//! virtual economy.
//!
//! The portal runs a single-tenant progression system: one account with a
//! currency balance, experience points, and a level derived from xp. Every
//! reward-bearing action (chance games, wager settlement, manual progress
//! grants) flows through the same reward engine, which mutates the account
//! and appends an audit record atomically under the account's lock.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EconomyService / GamesService / WagerService / ChatService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AccountRegistry (domain/)
//!     ├── TextGenerator (textgen/)
//!     │
//!     └── PostgreSQL telemetry sidecar (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod textgen;
pub mod ws;
