//! Server configuration from environment variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PORT` | 3000 |
//! | `DATA_FILE` | built-in reference table |
//! | `CACHE_TTL_SECS` | 300 (response cache and idle chat sessions) |
//! | `CHATBOT_*` | see `ChatbotConfig` |

use crate::chatbot::ChatbotConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub data_file: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub chatbot: ChatbotConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_file: None,
            cache_ttl: Duration::from_secs(300),
            chatbot: ChatbotConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let data_file = lookup("DATA_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        Self {
            port,
            data_file,
            cache_ttl,
            chatbot: ChatbotConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3000);
        assert!(config.data_file.is_none());
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_string()),
            "DATA_FILE" => Some("/tmp/plants.json".to_string()),
            "CACHE_TTL_SECS" => Some("30".to_string()),
            "CHATBOT_HISTORY_LIMIT" => Some("4".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/plants.json")));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.chatbot.history_limit, 4);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 3000);
    }
}
