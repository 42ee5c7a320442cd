use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::{Query, State},
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::AppState;
use crate::api::response::{self, CacheStatus};
use crate::cache::{NewsList, cache_key};
use crate::error::{AppError, Result};

pub fn create_router(app_state: AppState) -> Router {
    // ServeDir maps "/" to index.html and refuses paths escaping the root
    let static_files = ServeDir::new(&app_state.config.public_dir);

    Router::new()
        .route("/api/news", get(news_handler))
        .fallback_service(static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(app_state)
}

async fn news_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let topic = match first_topic(params).filter(|topic| !topic.is_empty()) {
        Some(topic) => topic,
        None => return AppError::ValidationError("Topic is required".to_string()).into_response(),
    };

    let start_time = Instant::now();
    match process_news_request(&state, topic.clone()).await {
        Ok((data, cache)) => {
            info!(%topic, ?cache, items = data.len(), elapsed = ?start_time.elapsed(), "served news");
            response::success(data.as_slice(), cache)
        }
        Err(err) => {
            error!(%topic, error = %err, "Error fetching news");
            err.into_response()
        }
    }
}

/// First `topic` value wins when the parameter is repeated.
fn first_topic(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(name, _)| name == "topic")
        .map(|(_, value)| value)
}

async fn process_news_request(
    state: &AppState,
    topic: String,
) -> Result<(NewsList, CacheStatus)> {
    let key = cache_key(&topic);

    if let Some(entry) = state.cache.get_fresh(&key) {
        return Ok((entry.data, CacheStatus::Hit));
    }

    info!(%topic, "cache miss, fetching news");
    let source = Arc::clone(&state.source);
    let data = state
        .cache
        .get_or_fetch(&key, move || async move { source.fetch_news(&topic).await })
        .await?;

    Ok((data, CacheStatus::Miss))
}
