// In-process adapters from the engine services to the UI ports.
use crate::services::{AuthState, DashboardSource};
use engine::services::{AuthService, DashboardService};
use engine::EngineError;
use shared::models::{DashboardData, User};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct EngineHandle {
    dashboard: Arc<DashboardService>,
}

impl EngineHandle {
    pub fn new(dashboard: Arc<DashboardService>) -> Self {
        EngineHandle { dashboard }
    }
}

impl DashboardSource for EngineHandle {
    async fn load_dashboard_data(&self) -> Result<DashboardData, EngineError> {
        self.dashboard.load_dashboard_data().await
    }
}

#[derive(Clone)]
pub struct AuthHandle {
    auth: Arc<AuthService>,
}

impl AuthHandle {
    pub fn new(auth: Arc<AuthService>) -> Self {
        AuthHandle { auth }
    }
}

impl AuthState for AuthHandle {
    fn current_user(&self) -> Option<User> {
        self.auth.current_user()
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.auth.subscribe()
    }
}
