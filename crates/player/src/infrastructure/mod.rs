pub mod client_config;
pub mod message_translator;
pub mod messaging;
pub mod platform;
pub mod url_handler;
pub mod websocket;

#[cfg(test)]
pub(crate) mod testing;

pub use client_config::{ClientConfig, ConfigError};
pub use messaging::{ConnectionState, ConnectionStateObserver, EventBus, ListenerId};
