//! Dispatch configuration and loaders.
use std::env;

#[derive(Clone, Debug)]
pub struct CommConfig {
    /// Capacity of the inbound frame queue between transport and dispatcher.
    pub inbound_buffer: usize,
    /// Treat messages without a registered handler as errors.
    pub strict: bool,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            inbound_buffer: 64,
            strict: false,
        }
    }
}

impl CommConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMM_INBOUND_BUFFER` - Inbound queue size (default: 64)
    /// - `COMM_STRICT` - Reject unknown message kinds (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("COMM_INBOUND_BUFFER") {
            config.inbound_buffer = capacity.max(1);
        }

        if let Some(strict) = read_env_bool("COMM_STRICT") {
            config.strict = strict;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

/// Lenient boolean parsing shared by the `from_env` loaders.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
