//! Hemline - fashion retail forecast dashboard service
//!
//! A thin presentation backend over three external collaborators: a
//! pretrained sales forecasting model, a declarative charting layer and a
//! chat-completion provider. Exposes login, forecast, resource-allocation
//! and assistant endpoints for the dashboard frontend.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod security;
pub mod services;
