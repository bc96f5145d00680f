use serde::Deserialize;

use crate::services::recommendations::{
    RecommendationOptions, DEFAULT_CONTRARIAN_LIMIT, DEFAULT_PRIMARY_LIMIT,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Compiled verified-content registry (JSON)
    #[serde(default = "default_registry_path")]
    pub registry_path: String,

    /// Episode display metadata (JSON list)
    #[serde(default = "default_episodes_path")]
    pub episodes_path: String,

    /// Primary recommendations returned when a request sets no limit
    #[serde(default = "default_primary_limit")]
    pub primary_limit: usize,

    #[serde(default = "default_contrarian_limit")]
    pub contrarian_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_registry_path() -> String {
    "data/verified-content.json".to_string()
}

fn default_episodes_path() -> String {
    "data/episodes.json".to_string()
}

fn default_primary_limit() -> usize {
    DEFAULT_PRIMARY_LIMIT
}

fn default_contrarian_limit() -> usize {
    DEFAULT_CONTRARIAN_LIMIT
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn recommendation_options(&self) -> RecommendationOptions {
        RecommendationOptions {
            contrarian_limit: self.contrarian_limit,
            ..RecommendationOptions::default()
        }
        .with_primary_limit(self.primary_limit)
    }
}
