use hemline::api::{self, app_state::AppState};
use hemline::config::config::LoggingConfig;
use hemline::config::loader::ConfigLoader;
use hemline::observability::{create_observability_router, ObservabilityState};
use hemline::predictor::{load_model, SalesModel};
use hemline::security::auth::create_credential_verifier;
use hemline::services::{
    create_assistant_service, create_chat_client, create_forecast_service, create_session_service,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if let Some(dir) = &config.log_dir {
        let appender = tracing_appender::rolling::daily(dir, "hemline.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        if config.structured {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
        }
        return Some(guard);
    }

    if config.structured {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    let _log_guard = init_tracing(&config.logging);
    info!("Starting Hemline...");

    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    // A missing or corrupt artifact degrades the dashboard instead of
    // aborting startup; every forecast action then reports its own error
    let model: Option<Arc<dyn SalesModel>> = match load_model(&config.model.path) {
        Ok(model) => {
            info!(path = %config.model.path.display(), model_type = model.model_type(), "model artifact loaded");
            Some(Arc::from(model))
        }
        Err(e) => {
            error!(path = %config.model.path.display(), "failed to load model artifact: {}", e);
            None
        }
    };
    let model_loaded = model.is_some();

    let verifier = create_credential_verifier(&config.auth);
    let session_service = create_session_service(Arc::from(verifier), &config.assistant.system_prompt);
    info!("Session service initialized");

    let forecast_service = create_forecast_service(model);
    info!("Forecast service initialized");

    let sessions: Arc<dyn hemline::services::session::SessionService> = Arc::from(session_service);
    let forecasts: Arc<dyn hemline::services::forecast::ForecastService> =
        Arc::from(forecast_service);

    let chat_client = create_chat_client(&config.assistant)?;
    let assistant_service = create_assistant_service(
        sessions.clone(),
        forecasts.clone(),
        Arc::from(chat_client),
        &config.assistant.model,
    );
    info!("Assistant service initialized");

    let observability_state = Arc::new(ObservabilityState::new("0.1.0".to_string(), model_loaded));
    let app_state = AppState {
        session_service: sessions,
        forecast_service: forecasts,
        assistant_service: Arc::from(assistant_service),
        metrics: observability_state.metrics.clone(),
    };
    info!("Application state created");

    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
