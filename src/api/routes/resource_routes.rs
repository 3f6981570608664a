use axum::{routing::post, Router};

use crate::api::app_state::AppState;
use crate::api::handlers::resource_handler;

/// Resource allocation routes
pub fn create_resource_router() -> Router<AppState> {
    Router::new().route("/resources/calculate", post(resource_handler::calculate))
}
