//! Authentication module
//!
//! The dashboard runs a single hard-coded account, but the check sits
//! behind an injected capability so a real authentication backend can be
//! substituted without touching the login flow.

use crate::config::config::AuthConfig;

/// Credential verification capability
pub trait CredentialVerifier: Send + Sync {
    /// Return true iff the pair matches an accepted credential
    fn verify(&self, username: &str, password: &str) -> bool;

    /// Verifier type for logging
    fn verifier_type(&self) -> &'static str;
}

/// Fixed single-tenant credential pair
///
/// No hashing, no lockout, no rate limiting: a deliberate simplification
/// for a single-user, non-critical tool.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    /// Create a verifier from configured credentials
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Create the development verifier with the default pair
    pub fn development() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }

    fn verifier_type(&self) -> &'static str {
        "StaticCredentials"
    }
}

/// Create the credential verifier from configuration
pub fn create_credential_verifier(config: &AuthConfig) -> Box<dyn CredentialVerifier> {
    Box::new(StaticCredentials::new(config))
}
