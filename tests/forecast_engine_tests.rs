// Integration tests for the forecast engine
//
// Tests cover:
// - Artifact loading from disk
// - Horizon and per-product adjustment behavior
// - The predict pipeline: batch, combine, aggregate, chart

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use hemline::models::forecast::{CombinedForecastTable, ALL_PRODUCTS};
use hemline::predictor::{load_model, SeasonalTrendModel};
use hemline::services::charts::{aggregated_forecast_chart, sales_heatmap};
use hemline::services::forecast::{
    expand_selection, horizon, product_adjustment, ForecastService, ForecastServiceImpl,
    PRODUCT_TYPES,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> ForecastServiceImpl {
    ForecastServiceImpl::new(Some(Arc::new(SeasonalTrendModel {
        level: 200.0,
        trend: 3.0,
        seasonal: vec![15.0, -10.0, 5.0, 0.0, -5.0, 10.0],
        sigma: 12.0,
    })))
}

#[rstest]
#[case(date(2024, 1, 1), date(2024, 1, 10), 1)]
#[case(date(2024, 1, 1), date(2024, 1, 31), 1)]
#[case(date(2024, 1, 1), date(2024, 3, 1), 2)]
#[case(date(2024, 1, 1), date(2025, 1, 1), 12)]
fn horizon_counts_thirty_day_blocks(
    #[case] start: NaiveDate,
    #[case] end: NaiveDate,
    #[case] expected: usize,
) {
    assert_eq!(horizon(start, end), expected);
}

#[rstest]
#[case("Women's Dresses")]
#[case("Jeans")]
#[case("Athletic Apparel")]
fn adjustment_is_bounded_and_stable(#[case] product: &str) {
    let adjustment = product_adjustment(product);
    assert!((0.0..0.05).contains(&adjustment));
    assert_eq!(adjustment, product_adjustment(product));
}

#[test]
fn artifact_round_trips_from_disk() {
    let path = std::env::temp_dir().join("hemline_artifact_test.json");
    std::fs::write(
        &path,
        r#"{"level": 150.0, "trend": 2.5, "seasonal": [12.0, -8.0, 4.0], "sigma": 9.0}"#,
    )
    .unwrap();

    let model = load_model(&path).unwrap();
    assert_eq!(model.model_type(), "seasonal_trend");

    let points = model.predict(3).unwrap();
    assert_eq!(points.len(), 3);
    // level + trend * 1 + seasonal[0]
    assert!((points[0].forecast - 164.5).abs() < 1e-9);
    assert!(points[0].lower < points[0].forecast);
    assert!(points[0].upper > points[0].forecast);

    std::fs::remove_file(&path).ok();
}

#[test]
fn corrupt_artifact_is_a_config_error() {
    let path = std::env::temp_dir().join("hemline_artifact_corrupt.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(load_model(&path).is_err());
    std::fs::remove_file(&path).ok();
}

#[test]
fn full_pipeline_aggregates_the_catalogue() {
    let service = service();
    let products = expand_selection(&[ALL_PRODUCTS.to_string()]);
    assert_eq!(products.len(), PRODUCT_TYPES.len());

    let batch = service
        .generate_batch(date(2024, 1, 1), date(2024, 7, 1), &products)
        .unwrap();
    assert_eq!(batch.tables.len(), PRODUCT_TYPES.len());
    assert!(batch.failures.is_empty());

    let combined = CombinedForecastTable::from_tables(&batch.tables);
    let aggregated = combined.aggregate_by_date();
    assert_eq!(aggregated.len(), 6);
    assert!(aggregated.rows.iter().all(|r| r.product == ALL_PRODUCTS));

    // The aggregate per date equals the sum across products
    let first_date = aggregated.rows[0].date;
    let expected: f64 = combined
        .rows
        .iter()
        .filter(|r| r.date == first_date)
        .map(|r| r.forecast)
        .sum();
    assert!((aggregated.rows[0].forecast - expected).abs() < 1e-9);

    let chart = aggregated_forecast_chart(&aggregated);
    assert_eq!(chart.traces[0].x.len(), 6);

    let heatmap = sales_heatmap(&combined);
    assert_eq!(heatmap.traces[0].y_labels.len(), PRODUCT_TYPES.len());
    assert_eq!(heatmap.traces[0].z.len(), PRODUCT_TYPES.len());
}

#[test]
fn resource_requirement_follows_the_forecast() {
    let table = service()
        .generate(date(2024, 1, 1), date(2024, 7, 1), "Handbags")
        .unwrap();

    for row in &table.rows {
        assert!((row.resource_requirement - row.forecast.max(0.0) * 0.1).abs() < 1e-9);
    }
    assert!(table.total_resource_requirement() > 0.0);
}
