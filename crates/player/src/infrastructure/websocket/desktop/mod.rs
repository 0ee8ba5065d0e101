//! Desktop WebSocket implementation using tokio-tungstenite

mod connector;

pub use connector::TungsteniteConnector;
