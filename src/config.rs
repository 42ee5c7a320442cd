use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const API_KEY_VAR: &str = "GROK_API_KEY";
pub const DEFAULT_GROK_API_URL: &str = "https://api.x.ai/v1/chat/completions";
pub const DEFAULT_GROK_MODEL: &str = "grok-2-latest";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub grok_api_key: String,
    pub grok_api_url: String,
    pub grok_model: String,
    pub cache_ttl: Duration,
    /// `None` keeps every topic until restart.
    pub cache_max_entries: Option<usize>,
    pub public_dir: PathBuf,
}

impl Config {
    /// Defaults for everything except the credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Config {
            server_addr: SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000),
            grok_api_key: api_key.into(),
            grok_api_url: DEFAULT_GROK_API_URL.to_string(),
            grok_model: DEFAULT_GROK_MODEL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_max_entries: None,
            public_dir: PathBuf::from("public"),
        }
    }

    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(format!("{API_KEY_VAR} not found in environment variables."))
            })?;

        let mut config = Config::with_api_key(api_key);

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        config.server_addr = SocketAddr::new(ip, port);

        if let Some(url) = lookup("GROK_API_URL") {
            config.grok_api_url = url;
        }
        if let Some(model) = lookup("GROK_MODEL") {
            config.grok_model = model;
        }
        if let Some(ttl) = lookup("NEWS_CACHE_TTL_SECS") {
            let secs = ttl
                .parse::<u64>()
                .map_err(|e| AppError::ConfigError(format!("Invalid cache ttl: {}", e)))?;
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(max) = lookup("NEWS_CACHE_MAX_ENTRIES") {
            let max = max
                .parse::<usize>()
                .map_err(|e| AppError::ConfigError(format!("Invalid cache size: {}", e)))?;
            config.cache_max_entries = Some(max);
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
