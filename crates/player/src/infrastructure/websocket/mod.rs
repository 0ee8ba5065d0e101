//! WebSocket connection to the game server
//!
//! - `manager`: the reconnecting connection/dispatch actor
//! - `desktop`: tokio-tungstenite transport
//! - `message_builder`: shared ClientMessage construction logic

pub(crate) mod core;
mod desktop;
mod manager;
mod message_builder;
pub(crate) mod shared;

pub use desktop::TungsteniteConnector;
pub use manager::{ConnectError, ConnectionManager, ConnectionSettings, SendError};
pub use message_builder::ClientMessageBuilder;
