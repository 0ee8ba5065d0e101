//! Desktop WebSocket transport using tokio-tungstenite
//!
//! Each open spawns a read task and a write task. The manager talks to them
//! through the [`Link`] channels only.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::infrastructure::websocket::shared::LINK_BUFFER;
use crate::ports::outbound::{Connector, Link, LinkEvent, TransportError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

impl TungsteniteConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn open(&self, url: &Url) -> Result<Link, TransportError> {
        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| TransportError::Open(e.to_string()))?;
        tracing::debug!(url = %url, "WebSocket handshake complete");

        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(LINK_BUFFER);
        let (inbound_tx, inbound_rx) = mpsc::channel::<LinkEvent>(LINK_BUFFER);

        tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(text)).await {
                    tracing::error!("Failed to send message: {}", e);
                    return;
                }
            }
            // Manager dropped the link; close politely
            let _ = write.send(Message::Close(None)).await;
        });

        tokio::spawn(async move {
            let reason = loop {
                match read.next().await {
                    Some(Ok(Message::Text(text))) => {
                        if inbound_tx.send(LinkEvent::Text(text)).await.is_err() {
                            // Nobody is listening any more
                            return;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!("Server closed connection");
                        break frame.map(|f| f.reason.to_string());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break Some(e.to_string());
                    }
                    None => break None,
                }
            };
            let _ = inbound_tx.send(LinkEvent::Closed { reason }).await;
        });

        Ok(Link {
            outbound: outbound_tx,
            inbound: inbound_rx,
        })
    }
}
