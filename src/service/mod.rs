//! Service layer: orchestration between the HTTP boundary and the domain.

pub mod chat;
pub mod economy;
pub mod games;
pub mod wagers;

pub use chat::ChatService;
pub use economy::EconomyService;
pub use games::{GamesService, ScratchResult};
pub use wagers::{WagerOutcome, WagerService};
