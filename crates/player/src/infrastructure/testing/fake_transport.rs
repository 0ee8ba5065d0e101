//! In-memory transport for driving the connection manager in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;
use url::Url;

use crate::infrastructure::websocket::shared::LINK_BUFFER;
use crate::ports::outbound::{Connector, Link, LinkEvent, TransportError};

/// Records every open. Either refuses all of them or hands the server end of
/// each link to the test through [`FakeConnector::accept`].
#[derive(Clone)]
pub struct FakeConnector {
    inner: Arc<Inner>,
}

struct Inner {
    fail: bool,
    opens: Mutex<Vec<(Instant, String)>>,
    servers_tx: mpsc::UnboundedSender<FakeServer>,
    servers_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<FakeServer>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Every open fails with a transport error.
    pub fn failing() -> Self {
        Self::build(true)
    }

    fn build(fail: bool) -> Self {
        let (servers_tx, servers_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                fail,
                opens: Mutex::new(Vec::new()),
                servers_tx,
                servers_rx: tokio::sync::Mutex::new(servers_rx),
            }),
        }
    }

    pub fn into_dyn(self) -> Arc<dyn Connector> {
        Arc::new(self)
    }

    pub fn open_count(&self) -> usize {
        self.inner.opens.lock().expect("opens lock").len()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.inner
            .opens
            .lock()
            .expect("opens lock")
            .iter()
            .map(|(_, url)| url.clone())
            .collect()
    }

    pub fn open_times(&self) -> Vec<Instant> {
        self.inner
            .opens
            .lock()
            .expect("opens lock")
            .iter()
            .map(|(at, _)| *at)
            .collect()
    }

    /// Wait for the next successful open and take its server end.
    pub async fn accept(&self) -> FakeServer {
        self.inner
            .servers_rx
            .lock()
            .await
            .recv()
            .await
            .expect("connector dropped")
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn open(&self, url: &Url) -> Result<Link, TransportError> {
        self.inner
            .opens
            .lock()
            .expect("opens lock")
            .push((Instant::now(), url.to_string()));

        if self.inner.fail {
            return Err(TransportError::Open("connection refused".to_string()));
        }

        let (outbound_tx, outbound_rx) = mpsc::channel(LINK_BUFFER);
        let (inbound_tx, inbound_rx) = mpsc::channel(LINK_BUFFER);
        let _ = self.inner.servers_tx.send(FakeServer {
            outbound: outbound_rx,
            inbound: inbound_tx,
        });

        Ok(Link {
            outbound: outbound_tx,
            inbound: inbound_rx,
        })
    }
}

/// The far end of one fake link.
pub struct FakeServer {
    outbound: mpsc::Receiver<String>,
    inbound: mpsc::Sender<LinkEvent>,
}

impl FakeServer {
    /// Next frame the client sent; `None` once the client dropped the link.
    pub async fn recv(&mut self) -> Option<String> {
        self.outbound.recv().await
    }

    /// Drain frames already sent without waiting.
    pub fn drain(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.outbound.try_recv() {
            frames.push(frame);
        }
        frames
    }

    pub async fn push(&self, text: &str) {
        let _ = self.inbound.send(LinkEvent::Text(text.to_string())).await;
    }

    pub async fn close(&self) {
        let _ = self
            .inbound
            .send(LinkEvent::Closed {
                reason: Some("going away".to_string()),
            })
            .await;
    }
}
