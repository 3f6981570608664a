use axum::{routing::post, Router};

use crate::api::app_state::AppState;
use crate::api::handlers::auth_handler;

/// Authentication routes
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth_handler::login))
        .route("/auth/logout", post(auth_handler::logout))
}
