//! Request handlers

pub mod assistant_handler;
pub mod auth_handler;
pub mod forecast_handler;
pub mod resource_handler;

use axum::http::HeaderMap;

use crate::error::{AppError, Result};

/// Header carrying the opaque session token
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Extract the session token from the request headers
pub(crate) fn session_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Authentication("Please log in to access the dashboard.".to_string())
        })
}
