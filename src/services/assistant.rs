//! Assistant bridge
//!
//! Maintains the per-session conversation transcript and forwards it to
//! the external chat-completion collaborator. Optionally injects a
//! request-scoped snapshot of the latest "All Products" forecast as an
//! extra system message; that message is never persisted into the
//! transcript. No retry, no timeout enforcement: upstream failures
//! propagate to the caller.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::config::AssistantConfig;
use crate::error::{AppError, Result};
use crate::models::forecast::ALL_PRODUCTS;
use crate::models::message::Message;
use crate::services::forecast::ForecastService;
use crate::services::session::SessionService;

/// Predefined questions offered by the dashboard's question selector
pub const PREDEFINED_QUESTIONS: [&str; 6] = [
    "What is the projected growth in sales for women's dresses in the upcoming winter season?",
    "How did promotional events affect jeans sales in the last quarter?",
    "What are the predicted sales figures for athletic apparel for the next six months?",
    "How have import tariffs impacted footwear sales since last year?",
    "Can you provide a month-by-month breakdown of handbag sales for last year?",
    "What impact does the holiday season have on children's clothing sales?",
];

/// Reply used when the provider returns a completion with no content
const EMPTY_COMPLETION_PLACEHOLDER: &str = "No response received.";

/// Forecast horizon injected into assistant context, in days
const CONTEXT_HORIZON_DAYS: i64 = 180;

/// Chat-completion collaborator capability
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Forward a one-shot message list and await a single completion.
    ///
    /// `Ok(None)` means the provider answered without content; transport
    /// and API errors surface as `AppError::Upstream`.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<Option<String>>;
}

/// OpenAI-compatible chat-completion client
pub struct OpenAiChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl OpenAiChatClient {
    /// Create a new client against an OpenAI-compatible endpoint
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiChatClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<Option<String>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": model,
                "messages": messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "chat completion returned {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed completion response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

/// Create the chat-completion client from configuration
pub fn create_chat_client(config: &AssistantConfig) -> Result<Box<dyn ChatCompletionClient>> {
    if config.api_key == "YOUR_API_KEY" {
        warn!("assistant API key is the placeholder; the first completion call will fail");
    }
    Ok(Box::new(OpenAiChatClient::new(
        &config.base_url,
        &config.api_key,
    )?))
}

/// Assistant service trait
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Append the query, optionally inject forecast context, forward the
    /// transcript and append + return the reply.
    async fn send(&self, token: &str, query: &str, include_forecast: bool) -> Result<String>;

    /// Reset the transcript to a single fresh system message
    fn clear(&self, token: &str) -> Result<()>;

    /// Current transcript
    fn history(&self, token: &str) -> Result<Vec<Message>>;
}

/// Assistant service implementation
pub struct AssistantServiceImpl {
    sessions: Arc<dyn SessionService>,
    forecasts: Arc<dyn ForecastService>,
    client: Arc<dyn ChatCompletionClient>,
    model: String,
}

impl AssistantServiceImpl {
    /// Create a new service instance
    pub fn new(
        sessions: Arc<dyn SessionService>,
        forecasts: Arc<dyn ForecastService>,
        client: Arc<dyn ChatCompletionClient>,
        model: &str,
    ) -> Self {
        Self {
            sessions,
            forecasts,
            client,
            model: model.to_string(),
        }
    }

    /// Serialize a 180-day "All Products" forecast into a context block:
    /// the table with cumulative and profit/loss columns, plus summary
    /// totals. Returns `None` when the model is not loaded; the chat
    /// proceeds without context in that case. Any other forecast failure
    /// propagates.
    fn forecast_context(&self) -> Result<Option<String>> {
        let start = Utc::now().date_naive();
        let end = start + Duration::days(CONTEXT_HORIZON_DAYS);

        let table = match self.forecasts.generate(start, end, ALL_PRODUCTS) {
            Ok(table) => table,
            Err(AppError::ModelUnavailable) => {
                warn!("skipping forecast context: model not loaded");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let cumulative = table.with_cumulative();

        let mut text = String::from("Predicted Sales and Resource Allocation:\n");
        text.push_str("Date        Forecast  Resource Requirement  Cumulative Forecast  Profit/Loss\n");
        for row in &cumulative {
            let _ = writeln!(
                text,
                "{}  {:>8.2}  {:>20.2}  {:>19.2}  {}",
                row.date, row.forecast, row.resource_requirement, row.cumulative, row.bucket
            );
        }

        let total_cumulative = cumulative.last().map(|r| r.cumulative).unwrap_or(0.0);
        let _ = write!(
            text,
            "Total Forecasted Sales: {:.2}\nTotal Cumulative Sales: {:.2}\nTotal Resource Requirement (Staff Hours): {:.2}",
            table.total_forecast(),
            total_cumulative,
            table.total_resource_requirement()
        );

        Ok(Some(text))
    }
}

#[async_trait]
impl AssistantService for AssistantServiceImpl {
    async fn send(&self, token: &str, query: &str, include_forecast: bool) -> Result<String> {
        if query.trim().is_empty() {
            return Err(AppError::Validation(
                "Please select a question or type your own to send.".to_string(),
            ));
        }

        // Validates the session before the transcript is touched
        self.sessions.get(token)?;
        self.sessions.append_message(token, Message::user(query))?;

        // One-shot outgoing list: the stored transcript plus an optional
        // request-scoped forecast block that is never persisted
        let mut outgoing = self.sessions.conversation(token)?;
        if include_forecast {
            if let Some(context) = self.forecast_context()? {
                outgoing.push(Message::system(format!(
                    "Here is the latest forecast and resource allocation data:\n{}",
                    context
                )));
            }
        }

        debug!(messages = outgoing.len(), model = %self.model, "forwarding transcript");
        let reply = self
            .client
            .complete(&self.model, &outgoing)
            .await?
            .unwrap_or_else(|| EMPTY_COMPLETION_PLACEHOLDER.to_string());

        self.sessions
            .append_message(token, Message::assistant(reply.clone()))?;

        Ok(reply)
    }

    fn clear(&self, token: &str) -> Result<()> {
        self.sessions.clear_conversation(token)
    }

    fn history(&self, token: &str) -> Result<Vec<Message>> {
        self.sessions.conversation(token)
    }
}

/// Create the assistant service
pub fn create_assistant_service(
    sessions: Arc<dyn SessionService>,
    forecasts: Arc<dyn ForecastService>,
    client: Arc<dyn ChatCompletionClient>,
    model: &str,
) -> Box<dyn AssistantService> {
    Box::new(AssistantServiceImpl::new(sessions, forecasts, client, model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;
    use crate::predictor::SeasonalTrendModel;
    use crate::security::auth::StaticCredentials;
    use crate::services::forecast::ForecastServiceImpl;
    use crate::services::session::SessionServiceImpl;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedClient {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatCompletionClient for CannedClient {
        async fn complete(&self, _model: &str, _messages: &[Message]) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn build(reply: Option<String>) -> (AssistantServiceImpl, Arc<dyn SessionService>, String) {
        let sessions: Arc<dyn SessionService> = Arc::new(SessionServiceImpl::new(
            Arc::new(StaticCredentials::development()),
            "persona",
        ));
        let forecasts: Arc<dyn ForecastService> =
            Arc::new(ForecastServiceImpl::new(Some(Arc::new(SeasonalTrendModel {
                level: 100.0,
                trend: 2.0,
                seasonal: vec![10.0, -5.0],
                sigma: 4.0,
            }))));
        let client = Arc::new(CannedClient {
            reply,
            calls: AtomicUsize::new(0),
        });

        let token = sessions.login("admin", "password").unwrap().token;
        let service =
            AssistantServiceImpl::new(sessions.clone(), forecasts, client, "gpt-3.5-turbo");
        (service, sessions, token)
    }

    #[tokio::test]
    async fn test_send_appends_user_and_assistant_turns() {
        let (service, sessions, token) = build(Some("rising demand".into()));

        let reply = service.send(&token, "How are jeans selling?", false).await.unwrap();
        assert_eq!(reply, "rising demand");

        let history = sessions.conversation(&token).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, Role::User);
        assert_eq!(history[2].role, Role::Assistant);
        assert_eq!(history[2].content, "rising demand");
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_call_and_keeps_history() {
        let (service, sessions, token) = build(Some("unused".into()));

        let err = service.send(&token, "   ", false).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(sessions.conversation(&token).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_content_yields_placeholder() {
        let (service, sessions, token) = build(None);

        let reply = service.send(&token, "hello", false).await.unwrap();
        assert_eq!(reply, "No response received.");
        assert_eq!(sessions.conversation(&token).unwrap()[2].content, reply);
    }

    #[tokio::test]
    async fn test_forecast_block_is_not_persisted() {
        let (service, sessions, token) = build(Some("ok".into()));

        service.send(&token, "include the numbers", true).await.unwrap();

        let history = sessions.conversation(&token).unwrap();
        // persona + user + assistant; the injected system block is request-scoped
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|m| !m.content.contains("Predicted Sales")));
    }

    #[test]
    fn test_forecast_context_contains_totals() {
        let (service, _sessions, _token) = build(Some("ok".into()));

        let context = service.forecast_context().unwrap().unwrap();
        assert!(context.starts_with("Predicted Sales and Resource Allocation:"));
        assert!(context.contains("Total Forecasted Sales:"));
        assert!(context.contains("Total Cumulative Sales:"));
        assert!(context.contains("Total Resource Requirement (Staff Hours):"));
    }

    #[tokio::test]
    async fn test_missing_model_skips_context_but_still_answers() {
        let sessions: Arc<dyn SessionService> = Arc::new(SessionServiceImpl::new(
            Arc::new(StaticCredentials::development()),
            "persona",
        ));
        let forecasts: Arc<dyn ForecastService> = Arc::new(ForecastServiceImpl::new(None));
        let client = Arc::new(CannedClient {
            reply: Some("answer without numbers".into()),
            calls: AtomicUsize::new(0),
        });
        let token = sessions.login("admin", "password").unwrap().token;
        let service = AssistantServiceImpl::new(sessions, forecasts, client, "gpt-3.5-turbo");

        let reply = service.send(&token, "include the numbers", true).await.unwrap();
        assert_eq!(reply, "answer without numbers");
    }

    #[tokio::test]
    async fn test_forecast_failure_propagates_from_context() {
        struct BrokenModel;
        impl crate::predictor::SalesModel for BrokenModel {
            fn predict(&self, _n_periods: usize) -> Result<Vec<crate::predictor::PredictedPoint>> {
                Err(AppError::Forecast("artifact rejected horizon".into()))
            }
            fn model_type(&self) -> &'static str {
                "broken"
            }
        }

        let sessions: Arc<dyn SessionService> = Arc::new(SessionServiceImpl::new(
            Arc::new(StaticCredentials::development()),
            "persona",
        ));
        let forecasts: Arc<dyn ForecastService> =
            Arc::new(ForecastServiceImpl::new(Some(Arc::new(BrokenModel))));
        let client = Arc::new(CannedClient {
            reply: Some("unreached".into()),
            calls: AtomicUsize::new(0),
        });
        let token = sessions.login("admin", "password").unwrap().token;
        let service = AssistantServiceImpl::new(sessions, forecasts, client, "gpt-3.5-turbo");

        let err = service.send(&token, "include the numbers", true).await.unwrap_err();
        assert!(matches!(err, AppError::Forecast(_)));
    }
}
