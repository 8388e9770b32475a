// UI library root.
//
// Headless presentation layer for the dashboard: components render engine
// data into displayable state, and the startup module brings the app up.

pub mod components;
pub mod config;
pub mod services;
pub mod startup;
pub mod state;
