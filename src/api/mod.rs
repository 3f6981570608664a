//! API module
//!
//! REST surface of the dashboard backend.

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::app_state::AppState;

/// Count every 4xx/5xx response, whichever handler produced it
async fn track_error_responses(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.status().is_client_error() || response.status().is_server_error() {
        state.metrics.record_error();
    }
    response
}

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::auth_routes::create_auth_router())
        .merge(routes::forecast_routes::create_forecast_router())
        .merge(routes::resource_routes::create_resource_router())
        .merge(routes::assistant_routes::create_assistant_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            track_error_responses,
        ))
        .layer(TraceLayer::new_for_http())
        // Browser frontend is served from a different origin in development
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
