//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use client_comm::CommConfig;
use client_comm::config::parse_bool;

/// Configuration required to bootstrap the client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub comm: CommConfig,
    pub session_id: Option<String>,
    pub log_to_file: bool,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub const fn new(comm: CommConfig) -> Self {
        Self {
            comm,
            session_id: None,
            log_to_file: false,
            log_dir: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLIENT_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `CLIENT_LOG_FILE` - Also write logs to a session file (default: false)
    /// - `CLIENT_LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `COMM_INBOUND_BUFFER`, `COMM_STRICT` - see [`CommConfig::from_env`]
    pub fn from_env() -> Self {
        let mut config = Self::new(CommConfig::from_env());

        config.session_id = env::var("CLIENT_SESSION_ID").ok();

        if let Some(enable) = env::var("CLIENT_LOG_FILE").ok().as_deref().and_then(parse_bool) {
            config.log_to_file = enable;
        } else if env::var("CLIENT_LOG_FILE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.log_to_file = true;
        }

        config.log_dir = env::var("CLIENT_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}
