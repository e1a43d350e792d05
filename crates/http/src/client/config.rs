//! Client configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ClientError;
use super::{
    DEFAULT_LOGIN_PATH, DEFAULT_REFRESH_PATH, DEFAULT_TIMEOUT, VolantClient, VolantClientBuilder,
};

/// Client configuration
///
/// Environment variables use the `VOLANT_` prefix: `VOLANT_BASE_URL`,
/// `VOLANT_TIMEOUT_SECS`, `VOLANT_USER_AGENT`, `VOLANT_REFRESH_PATH`,
/// `VOLANT_LOGIN_PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Admin API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent header, client default when unset
    pub user_agent: Option<String>,

    /// Path the refresh token is exchanged at
    pub refresh_path: String,

    /// Login page path used by the session-expiry fallback
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: None,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    fn defaults()
    -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ClientError> {
        let defaults = Self::default();

        Ok(config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("refresh_path", defaults.refresh_path)?
            .set_default("login_path", defaults.login_path)?)
    }

    /// Load configuration from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self, ClientError> {
        let settings = Self::defaults()?
            .add_source(config::Environment::with_prefix("VOLANT"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a file, with an environment overlay
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let settings = Self::defaults()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("VOLANT"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Client builder preloaded with this configuration
    pub fn into_builder(self) -> VolantClientBuilder {
        let mut builder = VolantClient::builder()
            .base_url(self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .refresh_path(self.refresh_path)
            .login_path(self.login_path);

        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder
    }
}

impl VolantClient {
    /// Build a client from configuration, with the default store and navigator
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        config.into_builder().build()
    }
}
