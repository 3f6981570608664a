//! Security module
//!
//! Credential verification for the dashboard login gate.

pub mod auth;
