//! Shared helpers: a counting `NewsSource` stub and router plumbing.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response},
};
use tower::ServiceExt as _; // for `oneshot`

use market_news_proxy::{
    AppState,
    api::{models::NewsItem, routes::create_router},
    config::Config,
    error::{AppError, Result},
    llm::NewsSource,
    news::parse_news,
};

pub const BODY_LIMIT: usize = 1024 * 1024;

pub const SAMPLE_REPLY: &str = "Markets surge today.\n\nOil prices fall sharply.";

pub enum Reply {
    Content(String),
    Fail(String),
}

/// Parses a canned reply the same way the Grok client does and counts calls.
pub struct StubSource {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn ok(content: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Content(content.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn slow(content: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Content(content.to_string()),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(detail.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for StubSource {
    async fn fetch_news(&self, _topic: &str) -> Result<Vec<NewsItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Content(content) => Ok(parse_news(content)),
            Reply::Fail(detail) => Err(AppError::UpstreamError(detail.clone())),
        }
    }
}

pub fn test_config() -> Config {
    Config::with_api_key("test-key")
}

pub fn test_state(source: Arc<StubSource>) -> AppState {
    AppState::new(test_config(), source)
}

pub fn test_router(state: AppState) -> Router {
    create_router(state)
}

pub async fn send(app: &Router, method: &str, uri: &str) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request build");
    app.clone().oneshot(req).await.expect("router response")
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec()
}

/// Fresh directory under the system temp dir holding the given files.
pub fn public_dir(tag: &str, files: &[(&str, &str)]) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("market-news-proxy-{tag}-{nanos}"));
    for (name, contents) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create public dir");
        }
        std::fs::write(&path, contents).expect("write public file");
    }
    std::fs::create_dir_all(&dir).expect("create public dir");
    dir
}
