//! Chart builders
//!
//! Pure mappings from forecast tables to declarative chart descriptions.
//! Rendering is an external collaborator: the frontend feeds these specs
//! to its plotting library unchanged. Colors and titles mirror the
//! dashboard's dark theme.

use serde::{Deserialize, Serialize};

use crate::models::forecast::{CombinedForecastTable, ForecastTable};

const LINE_WHITE: &str = "white";
const FILL_PROFIT: &str = "rgba(0, 255, 0, 0.5)";
const FILL_LOSS: &str = "rgba(255, 0, 0, 0.5)";
const BAR_ORANGE: &str = "orange";

/// Trace style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Line with markers
    Line,
    /// Filled area down to zero
    Area,
    /// Vertical bars
    Bar,
    /// (row x column) heatmap
    Heatmap,
}

/// One data series of a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    /// Legend name
    pub name: String,
    /// Trace style
    pub kind: TraceKind,
    /// X values (ISO dates, or formatted month labels for heatmaps)
    pub x: Vec<String>,
    /// Y values for line/area/bar traces
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub y: Vec<f64>,
    /// Row labels for heatmap traces
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub y_labels: Vec<String>,
    /// Cell values for heatmap traces
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub z: Vec<Vec<Option<f64>>>,
    /// Line color
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line_color: Option<String>,
    /// Fill color for area traces
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill_color: Option<String>,
    /// Marker/bar color
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub marker_color: Option<String>,
    /// Heatmap color scale
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub colorscale: Option<String>,
}

/// Declarative chart description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart title
    pub title: String,
    /// X axis title
    pub x_title: String,
    /// Y axis title
    pub y_title: String,
    /// Data series
    pub traces: Vec<Trace>,
    /// Interpretation help shown under the chart
    pub help: String,
}

fn iso_dates(table: &ForecastTable) -> Vec<String> {
    table.rows.iter().map(|r| r.date.to_string()).collect()
}

fn line_trace(name: &str, x: Vec<String>, y: Vec<f64>) -> Trace {
    Trace {
        name: name.to_string(),
        kind: TraceKind::Line,
        x,
        y,
        y_labels: Vec::new(),
        z: Vec::new(),
        line_color: Some(LINE_WHITE.to_string()),
        fill_color: None,
        marker_color: Some(LINE_WHITE.to_string()),
        colorscale: None,
    }
}

fn area_trace(name: &str, x: Vec<String>, y: Vec<f64>, fill: &str) -> Trace {
    Trace {
        name: name.to_string(),
        kind: TraceKind::Area,
        x,
        y,
        y_labels: Vec::new(),
        z: Vec::new(),
        line_color: None,
        fill_color: Some(fill.to_string()),
        marker_color: None,
        colorscale: None,
    }
}

/// Aggregated forecast line chart with profit/loss shading.
///
/// Positive values are shaded green ("Profit"), negative red ("Loss");
/// the clipped positive/negative splits are derived columns, the input
/// table is not mutated.
pub fn aggregated_forecast_chart(aggregated: &ForecastTable) -> ChartSpec {
    let x = iso_dates(aggregated);
    let y: Vec<f64> = aggregated.rows.iter().map(|r| r.forecast).collect();
    let profit: Vec<f64> = y.iter().map(|v| v.max(0.0)).collect();
    let loss: Vec<f64> = y.iter().map(|v| v.min(0.0)).collect();

    ChartSpec {
        title: "Aggregated Sales Forecast for All Products".to_string(),
        x_title: "Date".to_string(),
        y_title: "Predicted Sales (Profit/Loss)".to_string(),
        traces: vec![
            line_trace("Forecast", x.clone(), y),
            area_trace("Profit", x.clone(), profit, FILL_PROFIT),
            area_trace("Loss", x, loss, FILL_LOSS),
        ],
        help: "The white line is the aggregated predicted sales for all selected \
               products. The green area marks periods of positive sales (profit), \
               the red area periods of negative sales (loss)."
            .to_string(),
    }
}

/// Cumulative sales line chart with profit/loss shading over the running sum
pub fn cumulative_sales_chart(aggregated: &ForecastTable) -> ChartSpec {
    let cumulative = aggregated.with_cumulative();
    let x: Vec<String> = cumulative.iter().map(|r| r.date.to_string()).collect();
    let y: Vec<f64> = cumulative.iter().map(|r| r.cumulative).collect();
    let profit: Vec<f64> = y.iter().map(|v| v.max(0.0)).collect();
    let loss: Vec<f64> = y.iter().map(|v| v.min(0.0)).collect();

    ChartSpec {
        title: "Cumulative Sales Forecast".to_string(),
        x_title: "Date".to_string(),
        y_title: "Cumulative Predicted Sales (Profit/Loss)".to_string(),
        traces: vec![
            line_trace("Cumulative Sales", x.clone(), y),
            area_trace("Cumulative Profit", x.clone(), profit, FILL_PROFIT),
            area_trace("Cumulative Loss", x, loss, FILL_LOSS),
        ],
        help: "The white line is the running total of predicted sales over the \
               selected date range. Green marks periods where the cumulative \
               total is positive, red where it is negative."
            .to_string(),
    }
}

/// Sales heatmap over (product x date)
pub fn sales_heatmap(combined: &CombinedForecastTable) -> ChartSpec {
    let pivot = combined.pivot();
    let x: Vec<String> = pivot
        .dates
        .iter()
        .map(|d| d.format("%b %Y").to_string())
        .collect();

    ChartSpec {
        title: "Sales Forecast Heatmap".to_string(),
        x_title: "Date".to_string(),
        y_title: "Product".to_string(),
        traces: vec![Trace {
            name: "Predicted Sales".to_string(),
            kind: TraceKind::Heatmap,
            x,
            y: Vec::new(),
            y_labels: pivot.products,
            z: pivot.values,
            line_color: None,
            fill_color: None,
            marker_color: None,
            colorscale: Some("Viridis".to_string()),
        }],
        help: "Color intensity shows the magnitude of predicted sales per \
               product and period, highlighting patterns and anomalies across \
               the catalogue."
            .to_string(),
    }
}

/// Resource allocation bar chart, no shading
pub fn resource_allocation_chart(aggregated: &ForecastTable) -> ChartSpec {
    let x = iso_dates(aggregated);
    let y: Vec<f64> = aggregated
        .rows
        .iter()
        .map(|r| r.resource_requirement)
        .collect();

    ChartSpec {
        title: "Resource Allocation Forecast".to_string(),
        x_title: "Date".to_string(),
        y_title: "Resource Requirement (Staff Hours)".to_string(),
        traces: vec![Trace {
            name: "Resource Requirement".to_string(),
            kind: TraceKind::Bar,
            x,
            y,
            y_labels: Vec::new(),
            z: Vec::new(),
            line_color: None,
            fill_color: None,
            marker_color: Some(BAR_ORANGE.to_string()),
            colorscale: None,
        }],
        help: "Bar height is the forecasted staff hours needed to meet \
               predicted demand for each period."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::ForecastRow;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn aggregated() -> ForecastTable {
        ForecastTable::new(vec![
            ForecastRow::new(date(2024, 1, 1), 120.0, 100.0, 140.0, "All Products"),
            ForecastRow::new(date(2024, 2, 1), -30.0, -50.0, -10.0, "All Products"),
        ])
    }

    #[test]
    fn test_profit_loss_split_is_clipped() {
        let spec = aggregated_forecast_chart(&aggregated());
        assert_eq!(spec.traces.len(), 3);

        let profit = &spec.traces[1];
        let loss = &spec.traces[2];
        assert_eq!(profit.y, vec![120.0, 0.0]);
        assert_eq!(loss.y, vec![0.0, -30.0]);
        assert_eq!(profit.fill_color.as_deref(), Some("rgba(0, 255, 0, 0.5)"));
        assert_eq!(loss.fill_color.as_deref(), Some("rgba(255, 0, 0, 0.5)"));
    }

    #[test]
    fn test_cumulative_chart_uses_running_sum() {
        let spec = cumulative_sales_chart(&aggregated());
        assert_eq!(spec.traces[0].y, vec![120.0, 90.0]);
    }

    #[test]
    fn test_heatmap_month_labels() {
        let combined = CombinedForecastTable::from_tables(&[ForecastTable::new(vec![
            ForecastRow::new(date(2024, 1, 1), 10.0, 5.0, 15.0, "Jeans"),
            ForecastRow::new(date(2024, 2, 1), 12.0, 6.0, 18.0, "Jeans"),
        ])]);

        let spec = sales_heatmap(&combined);
        let trace = &spec.traces[0];
        assert_eq!(trace.kind, TraceKind::Heatmap);
        assert_eq!(trace.x, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(trace.y_labels, vec!["Jeans"]);
        assert_eq!(trace.z, vec![vec![Some(10.0), Some(12.0)]]);
    }

    #[test]
    fn test_resource_chart_has_single_bar_trace() {
        let spec = resource_allocation_chart(&aggregated());
        assert_eq!(spec.traces.len(), 1);
        assert_eq!(spec.traces[0].kind, TraceKind::Bar);
        assert_eq!(spec.traces[0].y, vec![12.0, 0.0]);
        assert_eq!(spec.traces[0].marker_color.as_deref(), Some("orange"));
    }
}
