use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            // upstream detail stays in the logs, never in the body
            AppError::UpstreamError(_) | AppError::ConfigError(_) => response::fetch_failed(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
