pub mod models;
pub mod utils;

// Data models and display/parsing helpers shared between the engine and the
// UI process. Everything here is framework-free: no async, no I/O beyond
// tracing, so both sides can depend on it without pulling in each other.

pub use models::{DashboardData, Holding, Trade, TradeSide, User};
