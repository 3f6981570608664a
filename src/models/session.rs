use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::message::{Message, Role};

/// Per-browser dashboard session
///
/// Created on successful login, destroyed (fully reset) on logout. Holds
/// the login flag, the username and the assistant conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSession {
    /// Opaque session token
    pub token: String,

    /// Logged-in username
    pub username: String,

    /// Login state; sessions only exist while logged in
    pub logged_in: bool,

    /// Session creation time
    pub created_at: DateTime<Utc>,

    /// Last activity time
    pub last_active_at: DateTime<Utc>,

    /// Ordered conversation transcript; first element is always the
    /// system persona message
    pub conversation: Vec<Message>,
}

impl DashboardSession {
    /// Create a new logged-in session with a fresh conversation
    pub fn new(username: &str, system_prompt: &str) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            logged_in: true,
            created_at: now,
            last_active_at: now,
            conversation: vec![Message::system(system_prompt)],
        }
    }

    /// Update the last activity time
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Append a message to the transcript (append-only, chronological)
    pub fn append(&mut self, message: Message) {
        self.conversation.push(message);
        self.touch();
    }

    /// Reset the transcript to a single fresh system message
    pub fn clear_conversation(&mut self, system_prompt: &str) {
        self.conversation = vec![Message::system(system_prompt)];
        self.touch();
    }

    /// Check the transcript invariant: system persona first, then turns
    pub fn conversation_is_seeded(&self) -> bool {
        self.conversation
            .first()
            .map(|m| m.role == Role::System)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_seeds_system_message() {
        let session = DashboardSession::new("admin", "persona");
        assert!(session.logged_in);
        assert_eq!(session.username, "admin");
        assert_eq!(session.conversation.len(), 1);
        assert!(session.conversation_is_seeded());
    }

    #[test]
    fn test_clear_resets_to_single_system_message() {
        let mut session = DashboardSession::new("admin", "persona");
        session.append(Message::user("hello"));
        session.append(Message::assistant("hi"));
        assert_eq!(session.conversation.len(), 3);

        session.clear_conversation("persona");
        assert_eq!(session.conversation.len(), 1);
        assert!(session.conversation_is_seeded());
    }
}
