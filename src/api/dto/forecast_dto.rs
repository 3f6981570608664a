use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::forecast::{CombinedForecastTable, ForecastTable};
use crate::services::charts::ChartSpec;

/// Forecast generation request
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Range start (inclusive)
    pub start_date: NaiveDate,
    /// Range end (inclusive)
    pub end_date: NaiveDate,
    /// Selected product labels; "All Products" expands to the catalogue
    pub products: Vec<String>,
}

/// Forecast generation response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Aggregated forecast line chart with profit/loss shading
    pub aggregated_chart: ChartSpec,
    /// Cumulative sales line chart
    pub cumulative_chart: ChartSpec,
    /// Product x date heatmap
    pub heatmap: ChartSpec,
    /// Per-product rows, request order
    pub combined: CombinedForecastTable,
    /// Date-aggregated rows
    pub aggregated: ForecastTable,
    /// Per-product failure messages; the batch continues past them
    pub errors: Vec<String>,
    /// Non-fatal range warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Resource calculation request, same shape as forecasting
#[derive(Debug, Deserialize)]
pub struct ResourceRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub products: Vec<String>,
}

/// Resource calculation response
#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    /// Resource allocation bar chart
    pub chart: ChartSpec,
    /// Date-aggregated resource rows
    pub resource: ForecastTable,
    /// Per-product failure messages
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Product catalogue response
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Selectable labels, "All Products" first
    pub products: Vec<String>,
}
