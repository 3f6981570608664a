use std::sync::Arc;

use crate::observability::AppMetrics;
use crate::services::assistant::AssistantService;
use crate::services::forecast::ForecastService;
use crate::services::session::SessionService;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Session service for login/logout and transcript storage
    pub session_service: Arc<dyn SessionService>,
    /// Forecast engine over the pretrained model
    pub forecast_service: Arc<dyn ForecastService>,
    /// Assistant bridge to the chat-completion collaborator
    pub assistant_service: Arc<dyn AssistantService>,
    /// Application metrics
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_service", &"Arc<dyn SessionService>")
            .field("forecast_service", &"Arc<dyn ForecastService>")
            .field("assistant_service", &"Arc<dyn AssistantService>")
            .field("metrics", &"Arc<AppMetrics>")
            .finish()
    }
}
