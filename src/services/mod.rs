//! Service modules

pub mod assistant;
pub mod charts;
pub mod forecast;
pub mod session;

pub use assistant::{
    create_assistant_service, create_chat_client, AssistantService, ChatCompletionClient,
    OpenAiChatClient, PREDEFINED_QUESTIONS,
};
pub use charts::{ChartSpec, Trace, TraceKind};
pub use forecast::{
    create_forecast_service, ForecastBatch, ForecastFailure, ForecastService, PRODUCT_TYPES,
};
pub use session::{create_session_service, SessionService};
