//! Event Bus and connection-state plumbing shared by the manager and the app.

pub mod connection;
pub mod event_bus;

pub(crate) use connection::ConnectionStateCell;
pub use connection::{ConnectionState, ConnectionStateObserver};
pub use event_bus::{EventBus, Listener, ListenerId};
