use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Staff hours required per forecasted unit sold
pub const RESOURCE_FACTOR: f64 = 0.1;

/// Synthetic product label for the date-aggregated series
pub const ALL_PRODUCTS: &str = "All Products";

/// One forecasted month for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRow {
    /// Forecast month
    pub date: NaiveDate,
    /// Point forecast
    pub forecast: f64,
    /// Lower confidence bound
    pub lower_ci: f64,
    /// Upper confidence bound
    pub upper_ci: f64,
    /// Product label
    pub product: String,
    /// Derived staffing metric, always >= 0
    pub resource_requirement: f64,
}

impl ForecastRow {
    /// Build a row, deriving the resource requirement from the forecast.
    ///
    /// Invariant: `resource_requirement = max(forecast, 0) * RESOURCE_FACTOR`,
    /// non-negative even when the forecast is negative.
    pub fn new(
        date: NaiveDate,
        forecast: f64,
        lower_ci: f64,
        upper_ci: f64,
        product: impl Into<String>,
    ) -> Self {
        Self {
            date,
            forecast,
            lower_ci,
            upper_ci,
            product: product.into(),
            resource_requirement: forecast.max(0.0) * RESOURCE_FACTOR,
        }
    }
}

/// Profit/loss bucket by forecast sign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfitLoss {
    Profit,
    Loss,
}

impl ProfitLoss {
    /// Bucket a forecast value; zero counts as profit.
    pub fn from_forecast(value: f64) -> Self {
        if value >= 0.0 {
            ProfitLoss::Profit
        } else {
            ProfitLoss::Loss
        }
    }
}

impl std::fmt::Display for ProfitLoss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfitLoss::Profit => write!(f, "Profit"),
            ProfitLoss::Loss => write!(f, "Loss"),
        }
    }
}

/// A forecast row annotated with the running total of forecasts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeRow {
    /// Forecast month
    pub date: NaiveDate,
    /// Point forecast
    pub forecast: f64,
    /// Derived staffing metric
    pub resource_requirement: f64,
    /// Running sum of forecasts in date order
    pub cumulative: f64,
    /// Profit/loss bucket of the point forecast
    pub bucket: ProfitLoss,
}

/// Ordered forecast series for one product and one request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForecastTable {
    /// Rows, one per generated month
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Create a table from rows
    pub fn new(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    /// Number of forecast periods
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of point forecasts
    pub fn total_forecast(&self) -> f64 {
        self.rows.iter().map(|r| r.forecast).sum()
    }

    /// Sum of resource requirements
    pub fn total_resource_requirement(&self) -> f64 {
        self.rows.iter().map(|r| r.resource_requirement).sum()
    }

    /// Sort by date ascending and compute the running sum of forecasts.
    ///
    /// The sort is stable; post-aggregation tables hold one row per date so
    /// ties are not expected.
    pub fn with_cumulative(&self) -> Vec<CumulativeRow> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.date);

        let mut running = 0.0;
        rows.into_iter()
            .map(|r| {
                running += r.forecast;
                CumulativeRow {
                    date: r.date,
                    forecast: r.forecast,
                    resource_requirement: r.resource_requirement,
                    cumulative: running,
                    bucket: ProfitLoss::from_forecast(r.forecast),
                }
            })
            .collect()
    }
}

/// Union of per-product forecast tables for one request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CombinedForecastTable {
    /// All rows across products, request order
    pub rows: Vec<ForecastRow>,
}

impl CombinedForecastTable {
    /// Concatenate per-product tables, preserving request order
    pub fn from_tables(tables: &[ForecastTable]) -> Self {
        Self {
            rows: tables.iter().flat_map(|t| t.rows.iter().cloned()).collect(),
        }
    }

    /// Group rows by exact date equality and sum the numeric columns,
    /// relabeling the product as "All Products".
    ///
    /// The summed resource requirement equals the sum of per-row
    /// requirements, which may differ from `max(sum(forecast), 0) * factor`
    /// when individual forecasts are negative; the per-row invariant is the
    /// one that holds.
    pub fn aggregate_by_date(&self) -> ForecastTable {
        let mut grouped: BTreeMap<NaiveDate, (f64, f64, f64, f64)> = BTreeMap::new();

        for row in &self.rows {
            let entry = grouped.entry(row.date).or_insert((0.0, 0.0, 0.0, 0.0));
            entry.0 += row.forecast;
            entry.1 += row.lower_ci;
            entry.2 += row.upper_ci;
            entry.3 += row.resource_requirement;
        }

        let rows = grouped
            .into_iter()
            .map(
                |(date, (forecast, lower_ci, upper_ci, resource_requirement))| ForecastRow {
                    date,
                    forecast,
                    lower_ci,
                    upper_ci,
                    product: ALL_PRODUCTS.to_string(),
                    resource_requirement,
                },
            )
            .collect();

        ForecastTable::new(rows)
    }

    /// Pivot to a (product x date) matrix of point forecasts.
    ///
    /// Products keep first-seen (request) order; dates are sorted ascending.
    /// Cells with no forecast stay `None`.
    pub fn pivot(&self) -> ForecastPivot {
        let mut products: Vec<String> = Vec::new();
        let mut dates: Vec<NaiveDate> = Vec::new();

        for row in &self.rows {
            if !products.contains(&row.product) {
                products.push(row.product.clone());
            }
            if !dates.contains(&row.date) {
                dates.push(row.date);
            }
        }
        dates.sort();

        let mut values = vec![vec![None; dates.len()]; products.len()];
        for row in &self.rows {
            let pi = products.iter().position(|p| p == &row.product).unwrap();
            let di = dates.iter().position(|d| d == &row.date).unwrap();
            values[pi][di] = Some(row.forecast);
        }

        ForecastPivot {
            products,
            dates,
            values,
        }
    }
}

/// (product x date) forecast matrix for heatmap rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPivot {
    /// Row labels
    pub products: Vec<String>,
    /// Column labels, ascending
    pub dates: Vec<NaiveDate>,
    /// Forecast values; `None` where a (product, date) cell has no row
    pub values: Vec<Vec<Option<f64>>>,
}
