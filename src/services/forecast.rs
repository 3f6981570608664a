//! Forecast engine
//!
//! Wraps the pretrained model: horizon computation, deterministic
//! per-product adjustment, monthly row dates and the derived resource
//! requirement. Batch generation is best-effort per product: failures are
//! collected and the remaining products continue.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::forecast::{ForecastRow, ForecastTable};
use crate::predictor::SalesModel;

/// Product catalogue of the dashboard, excluding the synthetic
/// "All Products" entry
pub const PRODUCT_TYPES: [&str; 9] = [
    "Women's Dresses",
    "Jeans",
    "Casual Wear",
    "Formal Wear",
    "Athletic Apparel",
    "Footwear",
    "Accessories",
    "Handbags",
    "Children's Clothing",
];

/// One failed product in a batch request
#[derive(Debug, Clone, Serialize)]
pub struct ForecastFailure {
    /// Product label
    pub product: String,
    /// Failure reason
    pub reason: String,
}

/// Outcome of a best-effort batch: successes plus per-product failures
#[derive(Debug, Default)]
pub struct ForecastBatch {
    /// Tables for products that succeeded, request order
    pub tables: Vec<ForecastTable>,
    /// Products that failed, with reasons
    pub failures: Vec<ForecastFailure>,
}

/// Forecast service trait
pub trait ForecastService: Send + Sync {
    /// Generate the forecast table for one product over a date range
    fn generate(&self, start: NaiveDate, end: NaiveDate, product: &str) -> Result<ForecastTable>;

    /// Generate forecasts for several products, collecting per-product
    /// failures instead of aborting the batch.
    ///
    /// Errors only when the model artifact is not loaded at all.
    fn generate_batch(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        products: &[String],
    ) -> Result<ForecastBatch>;

    /// Whether the model artifact is loaded
    fn model_loaded(&self) -> bool;
}

/// Forecast service over an optionally-loaded model artifact
pub struct ForecastServiceImpl {
    model: Option<Arc<dyn SalesModel>>,
}

impl ForecastServiceImpl {
    /// Create a new service instance; `None` means the artifact failed to
    /// load and every forecast request short-circuits.
    pub fn new(model: Option<Arc<dyn SalesModel>>) -> Self {
        Self { model }
    }
}

/// Horizon in whole 30-day blocks, floored to at least one period.
///
/// Deliberately not a calendar-accurate month count: short ranges always
/// yield exactly one period.
pub fn horizon(start: NaiveDate, end: NaiveDate) -> usize {
    let periods = (end - start).num_days() / 30;
    periods.max(1) as usize
}

/// Deterministic multiplicative adjustment for a product label.
///
/// FNV-1a over the label, mapped into [0, 0.05) in 0.01 steps. A synthetic
/// stand-in for per-category models; repeatable across runs and platforms.
pub fn product_adjustment(product: &str) -> f64 {
    (fnv1a(product.as_bytes()) % 5) as f64 / 100.0
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(PRIME)
    })
}

impl ForecastService for ForecastServiceImpl {
    fn generate(&self, start: NaiveDate, end: NaiveDate, product: &str) -> Result<ForecastTable> {
        let model = self.model.as_ref().ok_or(AppError::ModelUnavailable)?;

        let n_periods = horizon(start, end);
        debug!(product, n_periods, "generating forecast");

        let points = model.predict(n_periods)?;
        let factor = 1.0 + product_adjustment(product);

        let mut rows = Vec::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            let date = start
                .checked_add_months(Months::new(i as u32))
                .ok_or_else(|| {
                    AppError::Forecast(format!("date overflow at period {} for {}", i, product))
                })?;

            rows.push(ForecastRow::new(
                date,
                point.forecast * factor,
                point.lower * factor,
                point.upper * factor,
                product,
            ));
        }

        Ok(ForecastTable::new(rows))
    }

    fn generate_batch(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        products: &[String],
    ) -> Result<ForecastBatch> {
        if self.model.is_none() {
            return Err(AppError::ModelUnavailable);
        }

        let mut batch = ForecastBatch::default();
        for product in products {
            match self.generate(start, end, product) {
                Ok(table) => batch.tables.push(table),
                Err(e) => batch.failures.push(ForecastFailure {
                    product: product.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(batch)
    }

    fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}

/// Expand a selection: "All Products" stands for the whole catalogue
pub fn expand_selection(selected: &[String]) -> Vec<String> {
    if selected.iter().any(|p| p == crate::models::forecast::ALL_PRODUCTS) {
        PRODUCT_TYPES.iter().map(|p| p.to_string()).collect()
    } else {
        selected.to_vec()
    }
}

/// Create the forecast service
pub fn create_forecast_service(model: Option<Arc<dyn SalesModel>>) -> Box<dyn ForecastService> {
    Box::new(ForecastServiceImpl::new(model))
}
