//! Shared helpers for the connection manager and its transports.
//!
//! Runtime-agnostic: no tokio in here.

use codenames_shared::{ClientMessage, ServerMessage};

// Reconnection defaults (the config layer falls back to these)
pub const RECONNECT_BASE_DELAY_MS: u64 = 2_000;
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const PING_INTERVAL_MS: u64 = 30_000;

/// Buffer size of the per-link outbound and inbound channels.
pub const LINK_BUFFER: usize = 32;

pub fn parse_server_message(text: &str) -> Result<ServerMessage, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn encode_client_message(msg: &ClientMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_frames_are_errors() {
        assert!(parse_server_message("not json").is_err());
        assert!(parse_server_message(r#"{"no_type": 1}"#).is_err());
    }

    #[test]
    fn known_frame_parses() {
        let msg = parse_server_message(r#"{"type":"pong","timestamp":"x"}"#).expect("parse");
        assert_eq!(msg, ServerMessage::Pong);
    }
}
