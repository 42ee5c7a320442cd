use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::api::models::NewsItem;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::news::{build_prompt, parse_news};

const SYSTEM_PROMPT: &str = "You are a test assistant.";

/// Anything that can produce news items for a topic.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self, topic: &str) -> Result<Vec<NewsItem>>;
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
    model: String,
    stream: bool,
    temperature: f32,
}

pub struct GrokClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GrokClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.grok_api_key.clone(),
            endpoint: config.grok_api_url.clone(),
            model: config.grok_model.clone(),
        }
    }

    /// Returns `choices[0].message.content` of a single deterministic completion.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: prompt.into(),
                },
            ],
            model: self.model.clone(),
            stream: false,
            temperature: 0.0,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let details = res.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "Grok API error: {}. Details: {}",
                status.canonical_reason().unwrap_or(status.as_str()),
                details
            )));
        }

        let json: serde_json::Value = res.json().await?;
        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::UpstreamError("Invalid response format from Grok".to_string()))?
            .to_string();

        Ok(reply)
    }
}

#[async_trait]
impl NewsSource for GrokClient {
    async fn fetch_news(&self, topic: &str) -> Result<Vec<NewsItem>> {
        info!(topic, model = %self.model, "requesting news from Grok");
        let content = self.complete(&build_prompt(topic)).await?;
        let items = parse_news(&content);
        debug!(topic, items = items.len(), "parsed Grok reply");
        Ok(items)
    }
}
