use axum::{
    routing::{get, post},
    Router,
};

use crate::api::app_state::AppState;
use crate::api::handlers::forecast_handler;

/// Forecast routes
pub fn create_forecast_router() -> Router<AppState> {
    Router::new()
        .route("/forecast/products", get(forecast_handler::products))
        .route("/forecast/predict", post(forecast_handler::predict))
}
