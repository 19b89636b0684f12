// Transport and output settings, loaded with the 'config' crate and 'dotenv'.
// The search query itself is always read interactively (see prompt.rs).

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.infoimoveis.com.br";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    /// Pause between consecutive page fetches.
    pub request_delay_ms: u64,
    /// Unset means the transport default applies.
    pub request_timeout_secs: Option<u64>,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::defaults()?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., IMOVEIS_REQUEST_DELAY_MS)
            .add_source(Environment::with_prefix("IMOVEIS").try_parsing(true));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("request_delay_ms", 1000)?
            .set_default("output_dir", ".")?)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
