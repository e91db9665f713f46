// Public modules
pub mod chat;
pub mod client;
pub mod currency;
pub mod error;
pub mod html;
pub mod listing;
pub mod markup;
pub mod observability;
pub mod render;
pub mod session_store;
pub mod transcript;
pub mod types;

// Re-exports
pub use client::{AgentClient, AgentTransport, DEFAULT_API_URL};
pub use currency::CurrencyFormat;
pub use error::{Error, Result};
pub use listing::{ListingCard, ListingPanel};
pub use observability::register_biometrics;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use transcript::{ChatTurn, Sender, Transcript};
pub use types::*;
