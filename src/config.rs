use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// The client's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address every request is issued against, without a trailing slash.
    pub api_base_url: String,
    /// Where the session is persisted between runs. In-memory when unset.
    pub session_file: Option<PathBuf>,
}

impl Config {
    /// Creates a `Config` for the given backend address.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_base_url(api_base_url.into()),
            session_file: None,
        }
    }

    /// Persists the session to `path`.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("RASD_API_BASE_URL")
            .context("RASD_API_BASE_URL must be set (e.g. https://api.example.org/api/v1)")?;

        if api_base_url.trim().is_empty() {
            anyhow::bail!("RASD_API_BASE_URL must not be empty");
        }

        let session_file = env::var("RASD_SESSION_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url: trim_base_url(api_base_url),
            session_file,
        })
    }
}

/// Removes a single trailing slash; request paths carry their own leading one.
fn trim_base_url(mut url: String) -> String {
    if url.ends_with('/') {
        url.pop();
    }
    url
}
