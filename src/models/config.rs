//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the backend API.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads settings from an optional `config.yaml` next to the working
    /// directory and `CRM_*` environment variables, `.env` included.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CRM"))
            .build()?
            .try_deserialize()
    }
}
