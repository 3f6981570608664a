//! Assistant handlers

use axum::{extract::State, http::HeaderMap, Json};
use tracing::debug;

use crate::api::app_state::AppState;
use crate::api::dto::assistant_dto::{
    ClearResponse, HistoryResponse, QuestionsResponse, SendRequest, SendResponse,
};
use crate::api::handlers::session_token;
use crate::error::{AppError, Result};
use crate::services::assistant::PREDEFINED_QUESTIONS;

/// GET /api/v1/assistant/questions
pub async fn questions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<QuestionsResponse>> {
    state.metrics.record_http_request();
    state.session_service.get(session_token(&headers)?)?;

    Ok(Json(QuestionsResponse {
        questions: PREDEFINED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    }))
}

/// GET /api/v1/assistant/history
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>> {
    state.metrics.record_http_request();
    let token = session_token(&headers)?;

    Ok(Json(HistoryResponse {
        messages: state.assistant_service.history(token)?,
    }))
}

/// POST /api/v1/assistant/send
pub async fn send(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>> {
    state.metrics.record_http_request();
    let token = session_token(&headers)?;
    state.metrics.record_assistant_request();

    debug!(include_forecast = request.include_forecast, "assistant send");
    let reply = state
        .assistant_service
        .send(token, &request.query, request.include_forecast)
        .await
        .map_err(|e| {
            if matches!(e, AppError::Upstream(_)) {
                state.metrics.record_upstream_error();
            }
            e
        })?;

    Ok(Json(SendResponse { reply }))
}

/// POST /api/v1/assistant/clear
pub async fn clear(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ClearResponse>> {
    state.metrics.record_http_request();
    let token = session_token(&headers)?;
    state.assistant_service.clear(token)?;

    Ok(Json(ClearResponse {
        message: "Chat history cleared. You can start a new conversation.".to_string(),
    }))
}
