//! Resource allocation handlers

use axum::{extract::State, http::HeaderMap, Json};
use tracing::debug;

use crate::api::app_state::AppState;
use crate::api::dto::forecast_dto::{ResourceRequest, ResourceResponse};
use crate::api::handlers::forecast_handler::{run_batch, validate_range};
use crate::api::handlers::session_token;
use crate::error::Result;
use crate::models::forecast::CombinedForecastTable;
use crate::services::charts::resource_allocation_chart;

/// POST /api/v1/resources/calculate
pub async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ResourceRequest>,
) -> Result<Json<ResourceResponse>> {
    state.metrics.record_http_request();
    state.session_service.get(session_token(&headers)?)?;
    state.metrics.record_resource_request();

    let warning = validate_range(request.start_date, request.end_date)?;
    debug!(
        start = %request.start_date,
        end = %request.end_date,
        products = request.products.len(),
        "resource request"
    );

    let batch = run_batch(&state, request.start_date, request.end_date, &request.products)?;
    let errors: Vec<String> = batch
        .failures
        .iter()
        .map(|f| {
            format!(
                "Could not generate resource requirements for {}: {}",
                f.product, f.reason
            )
        })
        .collect();

    let aggregated = CombinedForecastTable::from_tables(&batch.tables).aggregate_by_date();

    Ok(Json(ResourceResponse {
        chart: resource_allocation_chart(&aggregated),
        resource: aggregated,
        errors,
        warning,
    }))
}
