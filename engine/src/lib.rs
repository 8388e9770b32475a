// Engine library root.
//
// The engine owns trade data and the numbers derived from it; the UI crate
// talks to it through the service types re-exported here.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::EngineError;
pub use services::{AuthService, DashboardService};
