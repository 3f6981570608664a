//! Forecast handlers

use axum::{extract::State, http::HeaderMap, Json};
use chrono::NaiveDate;
use tracing::debug;

use crate::api::app_state::AppState;
use crate::api::dto::forecast_dto::{PredictRequest, PredictResponse, ProductsResponse};
use crate::api::handlers::session_token;
use crate::error::{AppError, Result};
use crate::models::forecast::ALL_PRODUCTS;
use crate::services::charts::{aggregated_forecast_chart, cumulative_sales_chart, sales_heatmap};
use crate::services::forecast::{expand_selection, ForecastBatch, PRODUCT_TYPES};

/// Minimum range for a full monthly horizon; shorter ranges still produce
/// one period, flagged with a warning
const MIN_RANGE_DAYS: i64 = 30;

pub(crate) fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<Option<String>> {
    if end < start {
        return Err(AppError::Validation(
            "End date must be on or after the start date.".to_string(),
        ));
    }

    if (end - start).num_days() < MIN_RANGE_DAYS {
        return Ok(Some(
            "Please select a date range of at least 30 days for meaningful predictions."
                .to_string(),
        ));
    }

    Ok(None)
}

pub(crate) fn validate_products(products: &[String]) -> Result<()> {
    if products.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one product.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn run_batch(
    state: &AppState,
    start: NaiveDate,
    end: NaiveDate,
    products: &[String],
) -> Result<ForecastBatch> {
    validate_products(products)?;
    let expanded = expand_selection(products);
    let batch = state.forecast_service.generate_batch(start, end, &expanded)?;

    if batch.tables.is_empty() {
        return Err(AppError::Forecast("No forecasts to display.".to_string()));
    }
    Ok(batch)
}

/// GET /api/v1/forecast/products
pub async fn products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProductsResponse>> {
    state.metrics.record_http_request();
    state.session_service.get(session_token(&headers)?)?;

    let mut products = vec![ALL_PRODUCTS.to_string()];
    products.extend(PRODUCT_TYPES.iter().map(|p| p.to_string()));

    Ok(Json(ProductsResponse { products }))
}

/// POST /api/v1/forecast/predict
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    state.metrics.record_http_request();
    state.session_service.get(session_token(&headers)?)?;
    state.metrics.record_forecast_request();

    let warning = validate_range(request.start_date, request.end_date)?;
    debug!(
        start = %request.start_date,
        end = %request.end_date,
        products = request.products.len(),
        "forecast request"
    );

    let batch = run_batch(&state, request.start_date, request.end_date, &request.products)?;
    let errors: Vec<String> = batch
        .failures
        .iter()
        .map(|f| format!("Could not generate forecast for {}: {}", f.product, f.reason))
        .collect();

    let combined = crate::models::forecast::CombinedForecastTable::from_tables(&batch.tables);
    let aggregated = combined.aggregate_by_date();

    Ok(Json(PredictResponse {
        aggregated_chart: aggregated_forecast_chart(&aggregated),
        cumulative_chart: cumulative_sales_chart(&aggregated),
        heatmap: sales_heatmap(&combined),
        combined,
        aggregated,
        errors,
        warning,
    }))
}
