//! Request and response data structures

pub mod assistant_dto;
pub mod auth_dto;
pub mod forecast_dto;
