//! CLI configuration utilities

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use volant_core::{FileCredentialStore, Navigator};
use volant_http::client::config::ClientConfig;
use volant_http::VolantClient;

/// Navigator for a terminal host.
///
/// There is no page to leave, so the expiry fallback always "navigates" by
/// telling the user to sign in again.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn navigate_to(&self, _path: &str) {
        eprintln!("Session expired. Run `volant login` to sign in again.");
    }
}

/// Everything a command needs to reach the admin API
pub struct CliContext {
    config: ClientConfig,
    credentials_path: PathBuf,
}

impl CliContext {
    /// Resolve configuration from the environment, with CLI overrides on top
    pub fn new(base_url: Option<String>, credentials: Option<PathBuf>) -> Result<Self> {
        let mut config = ClientConfig::from_env()?;
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }

        let credentials_path = credentials.unwrap_or_else(default_credentials_path);

        Ok(Self {
            config,
            credentials_path,
        })
    }

    /// Build a client backed by the on-disk credential store
    pub fn client(&self) -> Result<VolantClient> {
        let store = Arc::new(FileCredentialStore::new(&self.credentials_path));

        let client = self
            .config
            .clone()
            .into_builder()
            .credential_store(store)
            .navigator(Arc::new(ConsoleNavigator))
            .build()?;

        Ok(client)
    }
}

fn default_credentials_path() -> PathBuf {
    // Check environment variable first, then fall back to system data dir
    if let Ok(state_dir) = std::env::var("VOLANT_STATE_DIR") {
        PathBuf::from(state_dir).join("credentials.json")
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("volant")
            .join("credentials.json")
    }
}
