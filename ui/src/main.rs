// Headless shell for the trading dashboard: wires the engine to the UI
// components, registers every module, and drives one startup cycle.
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use engine::config::EngineSettings;
use engine::data::{TradeCsvImporter, TradeStore};
use engine::services::{AuthService, DashboardService};
use shared::models::{Trade, TradeSide, User};

use ui::components::{DashboardRenderer, SpinnerButton, ToastManager};
use ui::config::AppConfig;
use ui::services::{AuthHandle, EngineHandle};
use ui::startup::{Coordinator, ModuleRegistry, StartupSettings};
use ui::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("Starting dashboard UI...");

    let config = AppConfig::load_default()?;
    let engine_settings = EngineSettings {
        csv_delimiter: config.data.csv_delimiter,
        ..EngineSettings::default()
    };

    let trade_store = Arc::new(RwLock::new(TradeStore::new()));
    let dashboard = Arc::new(DashboardService::new(
        trade_store.clone(),
        engine_settings.clone(),
    ));
    let auth = Arc::new(AuthService::new());
    let toasts = ToastManager::with_timings(config.toast_timings());

    // Optional statement import: `ui <trades.csv>`. With no file the demo
    // seeds a couple of trades so the dashboard has something to show.
    if let Some(csv_path) = std::env::args().nth(1) {
        let imported = TradeCsvImporter::new(&engine_settings)
            .and_then(|importer| importer.import_file(&csv_path));
        match imported {
            Ok(trades) => {
                let added = trade_store.write().await.add_trades(trades);
                info!(added, file = %csv_path, "imported trade statement");
                toasts.success(format!("Imported {added} trades"));
            }
            Err(err) => {
                warn!(file = %csv_path, error = %err, "statement import failed");
                toasts.error("Could not import the statement");
            }
        }
    } else {
        let today = chrono::Utc::now().date_naive();
        let seeded = trade_store.write().await.add_trades(vec![
            Trade::new("INFY", TradeSide::Buy, 10.0, 1520.50, today),
            Trade::new("TCS", TradeSide::Buy, 5.0, 3890.00, today),
        ]);
        info!(seeded, "seeded demo trades");
    }

    let state = Arc::new(parking_lot::RwLock::new(AppState::default()));
    {
        let mut state = state.write();
        state.set_theme(config.theme());
        state.language = config.app.language.clone();
    }

    // Module registration, in no particular order; the coordinator waits
    // for the full set.
    let registry = ModuleRegistry::new();
    registry.provide_datastore(trade_store.clone());
    registry.provide_main(Arc::new(EngineHandle::new(dashboard)));
    registry.provide_ui(Arc::new(DashboardRenderer::new(state.clone())));
    registry.provide_auth(Arc::new(AuthHandle::new(auth.clone())));

    let user = User::new("dev@localhost");
    state.write().set_session(Some(user.clone()));
    auth.sign_in(user);

    let settings = StartupSettings::from_millis(config.startup.module_wait_ms);
    let coordinator = match Coordinator::run(&registry, settings).await {
        Some(coordinator) => coordinator,
        None => {
            error!("giving up: modules never registered");
            return Ok(());
        }
    };

    // One manual refresh with the spinner held busy, the way a refresh
    // button would drive it.
    let mut refresh_button = SpinnerButton::new();
    refresh_button.set_busy(true);
    coordinator.refresh_dashboard().await;
    refresh_button.set_busy(false);

    if let Some(view) = state.read().dashboard.clone() {
        info!(
            invested = %view.total_invested,
            value = %view.current_value,
            pnl = %view.realized_pnl,
            holdings = view.holding_rows.len(),
            "dashboard ready"
        );
    }

    coordinator.shutdown();
    toasts.clear();
    Ok(())
}
