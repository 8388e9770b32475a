// App startup coordinator. Waits for the registered collaborators, runs
// the first dashboard load when a session is already open, then follows
// session changes for as long as the app lives.
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::models::User;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::services::{AuthState, DashboardSource, DashboardUi};
use crate::startup::registry::{ModuleRegistry, Modules};

/// Knobs for the startup sequence.
#[derive(Debug, Clone)]
pub struct StartupSettings {
    /// How long to wait for all modules before giving up.
    pub module_wait: Duration,
}

impl StartupSettings {
    pub fn from_millis(module_wait_ms: u64) -> Self {
        StartupSettings {
            module_wait: Duration::from_millis(module_wait_ms),
        }
    }
}

impl Default for StartupSettings {
    fn default() -> Self {
        StartupSettings {
            module_wait: Duration::from_secs(5),
        }
    }
}

pub struct Coordinator<D, M, U, A> {
    modules: Modules<D, M, U, A>,
    ready: AtomicBool,
    // Monotonic ticket per dashboard fetch; only the holder of the latest
    // ticket may touch the screen when its fetch completes.
    refresh_seq: Arc<AtomicU64>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<D, M, U, A> Coordinator<D, M, U, A>
where
    D: Send + Sync + 'static,
    M: DashboardSource,
    U: DashboardUi,
    A: AuthState,
{
    /// Runs the startup sequence: waits for every module, loads the
    /// dashboard if a session is already open, then keeps following auth
    /// changes. Returns `None` when the modules never turn up.
    pub async fn run(
        registry: &ModuleRegistry<D, M, U, A>,
        settings: StartupSettings,
    ) -> Option<Arc<Self>> {
        let modules = match registry.wait_all(settings.module_wait).await {
            Ok(modules) => modules,
            Err(err) => {
                warn!("startup abandoned: {err}");
                return None;
            }
        };

        let coordinator = Arc::new(Coordinator {
            modules,
            ready: AtomicBool::new(false),
            refresh_seq: Arc::new(AtomicU64::new(0)),
            tasks: Mutex::new(Vec::new()),
        });

        // Subscribe before the first load; a session change that lands
        // while the initial fetch is in flight stays pending on this
        // receiver until the watch task picks it up.
        let sessions = coordinator.modules.auth.subscribe();

        if let Some(user) = coordinator.modules.auth.current_user() {
            info!(email = %user.email, "session already open, loading dashboard");
            coordinator.refresh_dashboard().await;
        } else {
            info!("no session at startup, dashboard deferred until sign-in");
        }

        coordinator.spawn_session_watch(sessions);
        coordinator.ready.store(true, Ordering::Release);
        info!("app ready");
        Some(coordinator)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Fetches a fresh dashboard snapshot and renders it, unless a newer
    /// refresh overtook this one in the meantime.
    pub async fn refresh_dashboard(&self) {
        Self::refresh(&self.modules, &self.refresh_seq).await;
    }

    /// Stops the session watch and any in-flight refresh.
    pub fn shutdown(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        info!("startup coordinator shut down");
    }

    fn spawn_session_watch(&self, mut sessions: watch::Receiver<Option<User>>) {
        let modules = self.modules.clone();
        let refresh_seq = self.refresh_seq.clone();

        let task = tokio::spawn(async move {
            while sessions.changed().await.is_ok() {
                let user = sessions.borrow_and_update().clone();
                match user {
                    Some(user) => {
                        info!(email = %user.email, "session opened, refreshing dashboard");
                        Self::refresh(&modules, &refresh_seq).await;
                    }
                    None => {
                        info!("session ended");
                    }
                }
            }
        });
        self.tasks.lock().push(task);
    }

    async fn refresh(modules: &Modules<D, M, U, A>, refresh_seq: &AtomicU64) {
        let seq = refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        match modules.main.load_dashboard_data().await {
            Ok(data) => {
                if refresh_seq.load(Ordering::SeqCst) == seq {
                    modules.ui.render_dashboard(&data);
                } else {
                    debug!(seq, "stale dashboard load dropped");
                }
            }
            Err(err) => {
                if refresh_seq.load(Ordering::SeqCst) == seq {
                    error!("dashboard load failed: {err}");
                    modules.ui.show_error("Failed to load dashboard");
                } else {
                    debug!(seq, "stale dashboard failure dropped");
                }
            }
        }
    }
}

impl<D, M, U, A> Drop for Coordinator<D, M, U, A> {
    fn drop(&mut self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}
