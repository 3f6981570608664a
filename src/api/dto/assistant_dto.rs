use serde::{Deserialize, Serialize};

use crate::models::message::Message;

/// Assistant send request
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    /// Free-text or predefined question
    pub query: String,
    /// Inject the latest forecast snapshot into the outgoing context
    #[serde(default)]
    pub include_forecast: bool,
}

/// Assistant send response
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub reply: String,
}

/// Predefined questions response
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// Conversation history response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

/// Clear-conversation response
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
}
