//! Authentication handlers

use axum::{extract::State, http::HeaderMap, Json};
use tracing::debug;

use crate::api::app_state::AppState;
use crate::api::dto::auth_dto::{LoginRequest, LoginResponse, LogoutResponse};
use crate::api::handlers::session_token;
use crate::error::Result;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    state.metrics.record_http_request();
    debug!(username = %request.username, "login attempt");

    let session = state
        .session_service
        .login(&request.username, &request.password)?;
    state
        .metrics
        .set_sessions_active(state.session_service.active_sessions());

    Ok(Json(LoginResponse {
        token: session.token,
        username: session.username,
        message: "Logged in successfully.".to_string(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Unconditional: destroying an already-gone session still succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>> {
    state.metrics.record_http_request();

    if let Ok(token) = session_token(&headers) {
        state.session_service.logout(token);
    }
    state
        .metrics
        .set_sessions_active(state.session_service.active_sessions());

    Ok(Json(LogoutResponse {
        message: "Logged out successfully.".to_string(),
    }))
}
