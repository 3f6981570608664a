//! Observability module
//!
//! Atomic-counter metrics, health checks and the router exposing them.

use axum::{response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

// ===== Simple Metrics (atomics, no external registry) =====

/// Application metrics
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub http_requests_total: Arc<AtomicU64>,
    pub forecast_requests_total: Arc<AtomicU64>,
    pub resource_requests_total: Arc<AtomicU64>,
    pub assistant_requests_total: Arc<AtomicU64>,
    pub upstream_errors_total: Arc<AtomicU64>,
    pub sessions_active: Arc<AtomicUsize>,
    pub errors_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// Record an HTTP request
    pub fn record_http_request(&self) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a forecast generation request
    pub fn record_forecast_request(&self) {
        self.forecast_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a resource calculation request
    pub fn record_resource_request(&self) {
        self.resource_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record an assistant send
    pub fn record_assistant_request(&self) {
        self.assistant_requests_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a chat-completion failure
    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record an error response; fed by the router's response-status layer
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Track the live session count
    pub fn set_sessions_active(&self, count: usize) {
        self.sessions_active.store(count, Ordering::SeqCst);
    }

    /// Render metrics in Prometheus text format
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP forecast_requests_total Total forecast generation requests
# TYPE forecast_requests_total counter
forecast_requests_total {}
# HELP resource_requests_total Total resource calculation requests
# TYPE resource_requests_total counter
resource_requests_total {}
# HELP assistant_requests_total Total assistant sends
# TYPE assistant_requests_total counter
assistant_requests_total {}
# HELP upstream_errors_total Chat-completion failures
# TYPE upstream_errors_total counter
upstream_errors_total {}
# HELP sessions_active Live dashboard sessions
# TYPE sessions_active gauge
sessions_active {}
# HELP errors_total Total errors
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.forecast_requests_total.load(Ordering::SeqCst),
            self.resource_requests_total.load(Ordering::SeqCst),
            self.assistant_requests_total.load(Ordering::SeqCst),
            self.upstream_errors_total.load(Ordering::SeqCst),
            self.sessions_active.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// Health report
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub model_loaded: bool,
}

/// Observability state
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
    /// Whether the pretrained artifact loaded at startup
    pub model_loaded: bool,
}

impl ObservabilityState {
    pub fn new(version: String, model_loaded: bool) -> Self {
        Self {
            metrics: Arc::new(AppMetrics::default()),
            start_time: Utc::now(),
            version,
            model_loaded,
        }
    }

    /// Uptime of the process
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Handlers =====

/// Full health status; degraded (but serving) when the model is missing
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let health_status = HealthStatus {
        status: if state.model_loaded {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        model_loaded: state.model_loaded,
    };

    (axum::http::StatusCode::OK, Json(health_status))
}

/// Simple liveness check
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Readiness check; the dashboard serves even without a model, every
/// forecast action then reports its own error
pub async fn readiness() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "Ready")
}

/// Prometheus metrics endpoint
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    state.metrics.gather()
}

/// Create the observability router
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .with_state(state)
}
