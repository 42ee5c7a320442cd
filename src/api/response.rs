use axum::Json;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    fn header_value(self) -> HeaderValue {
        match self {
            CacheStatus::Hit => HeaderValue::from_static("HIT"),
            CacheStatus::Miss => HeaderValue::from_static("MISS"),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: &'static str,
}

pub fn success<T: Serialize>(data: T, cache: CacheStatus) -> Response {
    let mut response = (StatusCode::OK, Json(data)).into_response();
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, cache.header_value());
    response
}

/// Generic body for any failure behind `/api/news`.
pub fn fetch_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to fetch news",
        }),
    )
        .into_response()
}
