use axum::{
    routing::{get, post},
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::assistant_handler;

/// Assistant routes
pub fn create_assistant_router() -> Router<AppState> {
    Router::new()
        .route("/assistant/questions", get(assistant_handler::questions))
        .route("/assistant/history", get(assistant_handler::history))
        .route("/assistant/send", post(assistant_handler::send))
        .route("/assistant/clear", post(assistant_handler::clear))
}
