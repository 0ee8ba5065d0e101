//! ClientMessage builder
//!
//! Centralizes construction of outgoing frames so the manager and the
//! services agree on their shape.

use codenames_shared::ClientMessage;

/// Builder for ClientMessage variants
///
/// # Usage
///
/// ```rust,ignore
/// let msg = ClientMessageBuilder::click_card(12);
/// manager.send(msg)?;
/// ```
pub struct ClientMessageBuilder;

impl ClientMessageBuilder {
    /// Sent automatically on every successful open
    pub fn get_state() -> ClientMessage {
        ClientMessage::GetState
    }

    pub fn click_card(index: usize) -> ClientMessage {
        ClientMessage::ClickCard { index }
    }

    pub fn ping() -> ClientMessage {
        ClientMessage::Ping
    }
}
