//! Configuration module for the vocabulary backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to verify bearer tokens (HS256). When unset, auth runs in
    /// dev mode and the bearer value is taken verbatim as the user id.
    pub jwt_secret: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("VOCAB_JWT_SECRET").ok();

        let db_path = env::var("VOCAB_DB_PATH")
            .unwrap_or_else(|_| "./data/vocab.sqlite".to_string())
            .into();

        let bind_addr = env::var("VOCAB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid VOCAB_BIND_ADDR format");

        let log_level = env::var("VOCAB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            jwt_secret,
            db_path,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("VOCAB_JWT_SECRET");
        env::remove_var("VOCAB_DB_PATH");
        env::remove_var("VOCAB_BIND_ADDR");
        env::remove_var("VOCAB_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.jwt_secret.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/vocab.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
