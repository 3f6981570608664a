//! Session service
//!
//! Owns the in-memory session map: login, logout and conversation
//! transcript access. One entry per browser session, destroyed on logout.
//! Nothing is persisted; process restart drops all sessions.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::message::Message;
use crate::models::session::DashboardSession;
use crate::security::auth::CredentialVerifier;

/// Session service trait
pub trait SessionService: Send + Sync {
    /// Validate credentials and create a logged-in session
    fn login(&self, username: &str, password: &str) -> Result<DashboardSession>;

    /// Destroy a session entirely; returns false for unknown tokens
    fn logout(&self, token: &str) -> bool;

    /// Fetch a session snapshot by token
    fn get(&self, token: &str) -> Result<DashboardSession>;

    /// Append a message to a session's transcript
    fn append_message(&self, token: &str, message: Message) -> Result<()>;

    /// Current transcript of a session
    fn conversation(&self, token: &str) -> Result<Vec<Message>>;

    /// Reset a session's transcript to a single fresh system message
    fn clear_conversation(&self, token: &str) -> Result<()>;

    /// Number of live sessions
    fn active_sessions(&self) -> usize;
}

/// In-memory session service implementation
pub struct SessionServiceImpl {
    verifier: Arc<dyn CredentialVerifier>,
    system_prompt: String,
    sessions: DashMap<String, DashboardSession>,
}

impl SessionServiceImpl {
    /// Create a new service instance
    pub fn new(verifier: Arc<dyn CredentialVerifier>, system_prompt: &str) -> Self {
        Self {
            verifier,
            system_prompt: system_prompt.to_string(),
            sessions: DashMap::new(),
        }
    }
}

impl SessionService for SessionServiceImpl {
    fn login(&self, username: &str, password: &str) -> Result<DashboardSession> {
        if !self.verifier.verify(username, password) {
            return Err(AppError::Authentication(
                "Incorrect username or password.".to_string(),
            ));
        }

        let session = DashboardSession::new(username, &self.system_prompt);
        info!(username, token = %session.token, "session created");
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.remove(token).is_some();
        if removed {
            info!(token, "session destroyed");
        }
        removed
    }

    fn get(&self, token: &str) -> Result<DashboardSession> {
        self.sessions
            .get(token)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::Authentication("Please log in to access the dashboard.".into()))
    }

    fn append_message(&self, token: &str, message: Message) -> Result<()> {
        let mut entry = self
            .sessions
            .get_mut(token)
            .ok_or_else(|| AppError::Authentication("Please log in to access the dashboard.".into()))?;
        entry.append(message);
        Ok(())
    }

    fn conversation(&self, token: &str) -> Result<Vec<Message>> {
        Ok(self.get(token)?.conversation)
    }

    fn clear_conversation(&self, token: &str) -> Result<()> {
        let mut entry = self
            .sessions
            .get_mut(token)
            .ok_or_else(|| AppError::Authentication("Please log in to access the dashboard.".into()))?;
        entry.clear_conversation(&self.system_prompt);
        Ok(())
    }

    fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

/// Create the session service
pub fn create_session_service(
    verifier: Arc<dyn CredentialVerifier>,
    system_prompt: &str,
) -> Box<dyn SessionService> {
    Box::new(SessionServiceImpl::new(verifier, system_prompt))
}
