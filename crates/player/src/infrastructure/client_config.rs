//! Client configuration loaded from the environment.
//!
//! Every value has a default matching the hosted game; environment
//! variables override them after `.env` has been loaded by the binary.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::infrastructure::websocket::shared::{
    MAX_RECONNECT_ATTEMPTS, PING_INTERVAL_MS, RECONNECT_BASE_DELAY_MS,
};

pub const DEFAULT_SERVER_HOST: &str = "codenames-u88n.onrender.com";
pub const DEFAULT_HOLD_MS: u64 = 1_200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host (and optional port) of the game server
    pub server_host: String,
    /// Use `wss://` instead of `ws://`
    pub secure: bool,
    pub hold_duration: Duration,
    pub max_reconnect_attempts: u32,
    pub reconnect_base_delay: Duration,
    pub ping_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            secure: true,
            hold_duration: Duration::from_millis(DEFAULT_HOLD_MS),
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            reconnect_base_delay: Duration::from_millis(RECONNECT_BASE_DELAY_MS),
            ping_interval: Duration::from_millis(PING_INTERVAL_MS),
        }
    }
}

impl ClientConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` with injectable input.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("CODENAMES_SERVER_HOST").filter(|h| !h.trim().is_empty()) {
            config.server_host = host.trim().to_string();
        }
        if let Some(raw) = lookup("CODENAMES_SECURE") {
            config.secure = parse_bool("CODENAMES_SECURE", &raw)?;
        }
        if let Some(raw) = lookup("CODENAMES_HOLD_MS") {
            config.hold_duration = Duration::from_millis(parse_num("CODENAMES_HOLD_MS", &raw)?);
        }
        if let Some(raw) = lookup("CODENAMES_MAX_RECONNECTS") {
            config.max_reconnect_attempts = parse_num("CODENAMES_MAX_RECONNECTS", &raw)?;
        }
        if let Some(raw) = lookup("CODENAMES_RECONNECT_BASE_MS") {
            config.reconnect_base_delay =
                Duration::from_millis(parse_num("CODENAMES_RECONNECT_BASE_MS", &raw)?);
        }
        if let Some(raw) = lookup("CODENAMES_PING_MS") {
            let ms: u64 = parse_num("CODENAMES_PING_MS", &raw)?;
            if ms == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "CODENAMES_PING_MS",
                    expected: "a positive number of milliseconds",
                    value: raw,
                });
            }
            config.ping_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// `{scheme}://{host}/ws?room={room}&user_id={identity}`
    pub fn ws_url(&self, room: &str, identity: &str) -> Result<Url, ConfigError> {
        let scheme = if self.secure { "wss" } else { "ws" };
        let mut url = Url::parse(&format!("{}://{}/ws", scheme, self.server_host))
            .map_err(|e| ConfigError::InvalidAddress(format!("{}: {}", self.server_host, e)))?;
        url.query_pairs_mut()
            .append_pair("room", room)
            .append_pair("user_id", identity);
        Ok(url)
    }

    /// Invite link to the game page, used when the client was not launched
    /// from one.
    pub fn page_url(&self, room: &str) -> Result<Url, ConfigError> {
        let scheme = if self.secure { "https" } else { "http" };
        let mut url = Url::parse(&format!("{}://{}/", scheme, self.server_host))
            .map_err(|e| ConfigError::InvalidAddress(format!("{}: {}", self.server_host, e)))?;
        url.query_pairs_mut().append_pair("room", room);
        Ok(url)
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        expected: "a non-negative integer",
        value: raw.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            expected: "a boolean",
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hosted_game() {
        let config = ClientConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.hold_duration, Duration::from_millis(1_200));
        assert_eq!(config.max_reconnect_attempts, 5);
        assert_eq!(config.reconnect_base_delay, Duration::from_secs(2));
        assert_eq!(config.ping_interval, Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CODENAMES_SERVER_HOST", "localhost:8080"),
            ("CODENAMES_SECURE", "false"),
            ("CODENAMES_HOLD_MS", "500"),
            ("CODENAMES_MAX_RECONNECTS", "2"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.server_host, "localhost:8080");
        assert!(!config.secure);
        assert_eq!(config.hold_duration, Duration::from_millis(500));
        assert_eq!(config.max_reconnect_attempts, 2);
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("CODENAMES_HOLD_MS", "soon")]))
            .expect_err("should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "CODENAMES_HOLD_MS",
                ..
            }
        ));
        assert!(ClientConfig::from_lookup(lookup(&[("CODENAMES_PING_MS", "0")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("CODENAMES_SECURE", "maybe")])).is_err());
    }

    #[test]
    fn ws_url_carries_room_and_identity() {
        let url = ClientConfig::default().ws_url("ABCD", "42").expect("url");
        assert_eq!(
            url.as_str(),
            "wss://codenames-u88n.onrender.com/ws?room=ABCD&user_id=42"
        );

        let plain = ClientConfig {
            server_host: "127.0.0.1:9000".to_string(),
            secure: false,
            ..ClientConfig::default()
        };
        assert_eq!(
            plain.ws_url("R 1", "x").expect("url").as_str(),
            "ws://127.0.0.1:9000/ws?room=R+1&user_id=x"
        );
        assert_eq!(
            plain.page_url("ABCD").expect("url").as_str(),
            "http://127.0.0.1:9000/?room=ABCD"
        );
    }
}
