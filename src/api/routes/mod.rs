//! Route definitions

pub mod assistant_routes;
pub mod auth_routes;
pub mod forecast_routes;
pub mod resource_routes;
