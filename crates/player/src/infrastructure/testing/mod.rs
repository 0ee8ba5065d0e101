//! Test doubles and fixtures for infrastructure ports.

pub mod fixtures;
mod fake_transport;

pub use fake_transport::{FakeConnector, FakeServer};

use crate::infrastructure::client_config::ClientConfig;
use crate::infrastructure::websocket::ConnectionManager;

/// Manager connected to room `ABCD` as `42`, with the initial `get_state`
/// already taken off the wire.
pub async fn connected_manager() -> (ConnectionManager, FakeConnector, FakeServer) {
    let connector = FakeConnector::new();
    let config = ClientConfig {
        server_host: "game.test".to_string(),
        secure: false,
        ..ClientConfig::default()
    };
    let manager = ConnectionManager::new(config, connector.clone().into_dyn());
    manager.connect("ABCD", "42").expect("connect");

    let mut server = connector.accept().await;
    assert_eq!(
        server.recv().await.as_deref(),
        Some(r#"{"action":"get_state"}"#)
    );
    assert!(manager.is_connected());
    (manager, connector, server)
}
