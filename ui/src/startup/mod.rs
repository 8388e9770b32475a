//! App startup: module registration and the startup coordinator.

pub mod coordinator;
pub mod registry;

pub use coordinator::{Coordinator, StartupSettings};
pub use registry::{MissingModules, ModuleRegistry, Modules};
