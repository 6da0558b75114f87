//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the portal's original camelCase wire format.

pub mod account_dto;
pub mod chat_dto;
pub mod games_dto;
pub mod wager_dto;

pub use account_dto::*;
pub use chat_dto::*;
pub use games_dto::*;
pub use wager_dto::*;
