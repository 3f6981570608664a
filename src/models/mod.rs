//! Domain entities
//!
//! Transient, in-memory data: chat messages, forecast tables and the
//! per-browser dashboard session. Nothing here is persisted.

pub mod forecast;
pub mod message;
pub mod session;

pub use forecast::{CombinedForecastTable, CumulativeRow, ForecastRow, ForecastTable, ProfitLoss};
pub use message::{Message, Role};
pub use session::DashboardSession;
