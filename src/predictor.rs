//! Pretrained sales model capability
//!
//! The forecasting model is an opaque pretrained artifact: given a period
//! count it returns point forecasts and confidence intervals of equal
//! length. It is loaded once per process from a fixed path and treated as
//! read-only by all callers. Callers never see the artifact internals,
//! only the `SalesModel` trait, so a different artifact (or a remote
//! predictor) can be substituted without touching the forecast engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, Result};

/// One predicted period: point forecast plus confidence bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedPoint {
    /// Point forecast
    pub forecast: f64,
    /// Lower confidence bound
    pub lower: f64,
    /// Upper confidence bound
    pub upper: f64,
}

/// Pretrained forecasting model
pub trait SalesModel: Send + Sync {
    /// Predict `n_periods` future periods.
    ///
    /// Returns one point per period; forecasts and confidence intervals
    /// always have equal length.
    fn predict(&self, n_periods: usize) -> Result<Vec<PredictedPoint>>;

    /// Artifact identifier for health reporting
    fn model_type(&self) -> &'static str;
}

/// Serialized seasonal-trend artifact
///
/// Pretrained parameters: a base level, a per-period linear trend, an
/// additive seasonal cycle and the residual standard deviation used for
/// the 95% confidence interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalTrendModel {
    /// Base level of the series
    pub level: f64,
    /// Linear trend per period
    pub trend: f64,
    /// Additive seasonal components, cycled over the horizon
    pub seasonal: Vec<f64>,
    /// Residual standard deviation
    pub sigma: f64,
}

impl SeasonalTrendModel {
    /// Load the artifact from a serialized file.
    ///
    /// Failures (missing file, corrupt contents) are configuration errors;
    /// the caller keeps running with no model and every downstream forecast
    /// action short-circuits with its own "model not loaded" message.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("model file {}: {}", path.display(), e))
        })?;

        let model: SeasonalTrendModel = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("model file {} is corrupt: {}", path.display(), e))
        })?;

        if model.seasonal.is_empty() {
            return Err(AppError::Config(format!(
                "model file {} has an empty seasonal cycle",
                path.display()
            )));
        }

        Ok(model)
    }
}

impl SalesModel for SeasonalTrendModel {
    fn predict(&self, n_periods: usize) -> Result<Vec<PredictedPoint>> {
        // z-score for the 95% interval baked into the artifact contract
        const Z: f64 = 1.96;

        let points = (0..n_periods)
            .map(|i| {
                let horizon = (i + 1) as f64;
                let forecast =
                    self.level + self.trend * horizon + self.seasonal[i % self.seasonal.len()];
                let half_width = Z * self.sigma * horizon.sqrt();
                PredictedPoint {
                    forecast,
                    lower: forecast - half_width,
                    upper: forecast + half_width,
                }
            })
            .collect();

        Ok(points)
    }

    fn model_type(&self) -> &'static str {
        "seasonal_trend"
    }
}

/// Load the pretrained model from the configured path
pub fn load_model(path: &Path) -> Result<Box<dyn SalesModel>> {
    let model = SeasonalTrendModel::load(path)?;
    Ok(Box::new(model))
}
