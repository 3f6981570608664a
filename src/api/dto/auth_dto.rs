use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response carrying the session token for later requests
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque session token, sent back in the `X-Session-Token` header
    pub token: String,
    pub username: String,
    pub message: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
