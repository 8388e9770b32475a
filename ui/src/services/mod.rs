// Seams between the UI and everything behind it. The startup coordinator
// only knows these traits; the engine adapters in [`engine_client`] are the
// production implementations, and tests substitute their own.
pub mod engine_client;

use engine::EngineError;
use shared::models::{DashboardData, User};
use std::future::Future;
use tokio::sync::watch;

/// Where dashboard numbers come from.
pub trait DashboardSource: Send + Sync + 'static {
    fn load_dashboard_data(
        &self,
    ) -> impl Future<Output = Result<DashboardData, EngineError>> + Send;
}

/// Where dashboard numbers go.
pub trait DashboardUi: Send + Sync + 'static {
    fn render_dashboard(&self, data: &DashboardData);
    fn show_error(&self, message: &str);
}

/// Session state as the UI sees it.
pub trait AuthState: Send + Sync + 'static {
    fn current_user(&self) -> Option<User>;
    /// Receiver holding the latest session value; rapid flips may coalesce.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;
}

pub use engine_client::{AuthHandle, EngineHandle};
