//! Transport port - how the connection manager reaches the server
//!
//! A [`Connector`] opens one text channel per call. The manager owns the
//! returned [`Link`]; dropping its `outbound` sender closes the socket.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to open connection: {0}")]
    Open(String),
    #[error("Connection closed: {0}")]
    Closed(String),
}

/// Inbound traffic from an open link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Text(String),
    /// The peer went away; no further events follow
    Closed { reason: Option<String> },
}

/// Both halves of an open text channel.
#[derive(Debug)]
pub struct Link {
    pub outbound: mpsc::Sender<String>,
    pub inbound: mpsc::Receiver<LinkEvent>,
}

#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Open a channel to `url`. Resolves once the handshake completed.
    async fn open(&self, url: &Url) -> Result<Link, TransportError>;
}
