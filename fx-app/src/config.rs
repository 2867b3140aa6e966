//! Configuration loading from environment.

use std::env;

use fx_provider::DEFAULT_BASE_URL;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub fx_api_base_url: String,
    pub fx_api_key: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let fx_api_base_url =
            env::var("FX_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let fx_api_key = env::var("FX_API_KEY")
            .map_err(|_| anyhow::anyhow!("FX_API_KEY environment variable is required"))?;

        Ok(Self {
            port,
            database_url,
            fx_api_base_url,
            fx_api_key,
        })
    }
}
