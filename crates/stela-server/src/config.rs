//! Server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, read from `STELA_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Externally reachable URL of this issuer, without the port.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Port the server listens on.
    #[serde(default = "default_server_port")]
    pub server_port: u16,

    /// Postgres connection string. Claims are kept in memory when unset.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_server_url() -> String {
    "http://localhost".to_string()
}

fn default_server_port() -> u16 {
    3001
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            server_port: default_server_port(),
            database_url: None,
        }
    }
}

impl Settings {
    /// Load settings from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(Environment::with_prefix("STELA"))
            .build()?
            .try_deserialize()?;
        url::Url::parse(&settings.server_url)
            .map_err(|e| ConfigError::Message(format!("invalid STELA_SERVER_URL: {}", e)))?;
        Ok(settings)
    }

    /// Origin advertised to new identities and in revocation status URLs.
    pub fn origin(&self) -> String {
        format!("{}:{}", self.server_url, self.server_port)
    }

    /// Socket address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}
