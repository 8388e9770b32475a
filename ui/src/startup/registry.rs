// Startup slots for the app's collaborators. Each module lands in its
// slot when its own initialization finishes, in any order; the coordinator
// awaits the full set instead of guessing readiness with a timer.
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug, Error)]
#[error("modules not ready after {waited:?}: {missing:?}")]
pub struct MissingModules {
    pub waited: Duration,
    pub missing: Vec<&'static str>,
}

// One registration slot, empty until its module is published.
struct Slot<T> {
    name: &'static str,
    cell: watch::Sender<Option<Arc<T>>>,
}

impl<T> Slot<T> {
    fn new(name: &'static str) -> Self {
        let (cell, _) = watch::channel(None);
        Slot { name, cell }
    }

    // Publishes the module and wakes every waiter. Registering twice
    // replaces the value; waiters only ever observe the latest.
    fn register(&self, module: Arc<T>) {
        if self.cell.borrow().is_some() {
            warn!(module = self.name, "module registered twice, replacing");
        }
        self.cell.send_replace(Some(module));
    }

    fn is_ready(&self) -> bool {
        self.cell.borrow().is_some()
    }

    // Waits until the module is registered.
    async fn ready(&self) -> Arc<T> {
        let mut rx = self.cell.subscribe();
        loop {
            if let Some(module) = rx.borrow_and_update().clone() {
                return module;
            }
            // The sender half lives in this slot, so the channel stays open
            // for as long as we are borrowing it.
            let _ = rx.changed().await;
        }
    }
}

/// The full collaborator set once every slot has been filled.
pub struct Modules<D, M, U, A> {
    pub datastore: Arc<D>,
    pub main: Arc<M>,
    pub ui: Arc<U>,
    pub auth: Arc<A>,
}

impl<D, M, U, A> Clone for Modules<D, M, U, A> {
    fn clone(&self) -> Self {
        Modules {
            datastore: self.datastore.clone(),
            main: self.main.clone(),
            ui: self.ui.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// Registration point for the four app collaborators: the data store
/// (opaque here, only its presence matters), the dashboard source, the
/// screen, and the auth session.
pub struct ModuleRegistry<D, M, U, A> {
    datastore: Slot<D>,
    main: Slot<M>,
    ui: Slot<U>,
    auth: Slot<A>,
}

impl<D, M, U, A> ModuleRegistry<D, M, U, A> {
    pub fn new() -> Self {
        ModuleRegistry {
            datastore: Slot::new("datastore"),
            main: Slot::new("main"),
            ui: Slot::new("ui"),
            auth: Slot::new("auth"),
        }
    }

    pub fn provide_datastore(&self, module: Arc<D>) {
        self.datastore.register(module);
    }

    pub fn provide_main(&self, module: Arc<M>) {
        self.main.register(module);
    }

    pub fn provide_ui(&self, module: Arc<U>) {
        self.ui.register(module);
    }

    pub fn provide_auth(&self, module: Arc<A>) {
        self.auth.register(module);
    }

    /// Waits for every collaborator, or reports which slots were still
    /// empty at the deadline.
    pub async fn wait_all(
        &self,
        timeout: Duration,
    ) -> Result<Modules<D, M, U, A>, MissingModules> {
        let all = async {
            Modules {
                datastore: self.datastore.ready().await,
                main: self.main.ready().await,
                ui: self.ui.ready().await,
                auth: self.auth.ready().await,
            }
        };
        match tokio::time::timeout(timeout, all).await {
            Ok(modules) => Ok(modules),
            Err(_) => Err(MissingModules {
                waited: timeout,
                missing: self.missing(),
            }),
        }
    }

    /// Names of the slots still empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.datastore.is_ready() {
            missing.push(self.datastore.name);
        }
        if !self.main.is_ready() {
            missing.push(self.main.name);
        }
        if !self.ui.is_ready() {
            missing.push(self.ui.name);
        }
        if !self.auth.is_ready() {
            missing.push(self.auth.name);
        }
        missing
    }
}

impl<D, M, U, A> Default for ModuleRegistry<D, M, U, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeStore;
    struct FakeMain;
    struct FakeUi;
    struct FakeAuth;

    fn registry() -> ModuleRegistry<FakeStore, FakeMain, FakeUi, FakeAuth> {
        ModuleRegistry::new()
    }

    fn register_all(registry: &ModuleRegistry<FakeStore, FakeMain, FakeUi, FakeAuth>) {
        registry.provide_datastore(Arc::new(FakeStore));
        registry.provide_main(Arc::new(FakeMain));
        registry.provide_ui(Arc::new(FakeUi));
        registry.provide_auth(Arc::new(FakeAuth));
    }

    #[tokio::test]
    async fn wait_all_returns_once_everything_registered() {
        let registry = registry();
        register_all(&registry);

        let modules = registry.wait_all(Duration::from_secs(1)).await;
        assert!(modules.is_ok());
        assert!(registry.missing().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_all_blocks_until_late_registration() {
        let registry = Arc::new(registry());
        registry.provide_datastore(Arc::new(FakeStore));
        registry.provide_main(Arc::new(FakeMain));
        registry.provide_ui(Arc::new(FakeUi));

        let late = registry.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            late.provide_auth(Arc::new(FakeAuth));
        });

        let modules = registry.wait_all(Duration::from_secs(1)).await;
        assert!(modules.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_reports_the_empty_slots() {
        let registry = registry();
        registry.provide_datastore(Arc::new(FakeStore));

        let err = registry
            .wait_all(Duration::from_millis(10))
            .await
            .err()
            .expect("registration never completed");
        assert_eq!(err.missing, vec!["main", "ui", "auth"]);
        assert_eq!(err.waited, Duration::from_millis(10));
    }

    #[tokio::test]
    async fn double_registration_keeps_the_latest() {
        let registry = registry();
        register_all(&registry);

        let replacement = Arc::new(FakeMain);
        registry.provide_main(replacement.clone());

        let modules = registry.wait_all(Duration::from_secs(1)).await.unwrap();
        assert!(Arc::ptr_eq(&modules.main, &replacement));
    }

    #[test]
    fn empty_registry_lists_every_slot_missing() {
        let registry = registry();
        assert_eq!(registry.missing(), vec!["datastore", "main", "ui", "auth"]);
    }
}
