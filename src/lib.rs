pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod llm;
pub mod news;
pub mod sentiment;

use std::sync::Arc;

use cache::NewsCache;
use config::Config;
use llm::{GrokClient, NewsSource};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: NewsCache,
    pub source: Arc<dyn NewsSource>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn NewsSource>) -> Self {
        Self {
            cache: NewsCache::from_config(&config),
            config: Arc::new(config),
            source,
        }
    }

    /// State wired to the real Grok API.
    pub fn from_config(config: Config) -> Self {
        let source = Arc::new(GrokClient::new(&config));
        Self::new(config, source)
    }
}
