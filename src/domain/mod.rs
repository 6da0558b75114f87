//! Domain layer: account aggregate, progression rules, chance games,
//! match catalog, and the event system.

pub mod account;
pub mod account_id;
pub mod account_registry;
pub mod activity;
pub mod chance;
pub mod chat_message;
pub mod event;
pub mod event_bus;
pub mod match_book;
pub mod progression;
pub mod reward;
pub mod ticket;

pub use account::AccountEntry;
pub use account_id::AccountId;
pub use account_registry::AccountRegistry;
pub use activity::ActivityRecord;
pub use event::AccountEvent;
pub use event_bus::{EventBus, SequencedEvent};
pub use match_book::{MatchBook, SportsMatch};
pub use reward::Reward;
pub use ticket::{ClaimKind, GameTicket};
