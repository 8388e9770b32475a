// Engine main entry point: wires the store and services together, imports
// a statement CSV if one is given, and logs the resulting snapshot.
use engine::config::settings::EngineSettings;
use engine::data::csv_import::TradeCsvImporter;
use engine::data::trade_store::TradeStore;
use engine::services::auth::AuthService;
use engine::services::dashboard::DashboardService;
use shared::models::User;
use shared::utils;
use std::env;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting dashboard engine...");

    let settings = match env::var("ENGINE_CONFIG") {
        Ok(path) => EngineSettings::from_file(&path)?,
        Err(_) => EngineSettings::default(),
    };

    let trade_store = Arc::new(RwLock::new(TradeStore::new()));
    let dashboard_service = DashboardService::new(trade_store.clone(), settings.clone());
    let auth_service = AuthService::new();

    if let Some(csv_path) = env::args().nth(1) {
        let importer = TradeCsvImporter::new(&settings)?;
        let trades = importer.import_file(&csv_path)?;
        let added = trade_store.write().await.add_trades(trades);
        info!(added, "imported trades from {}", csv_path);
    }

    auth_service.sign_in(User::new("dev@localhost"));

    let data = dashboard_service.load_dashboard_data().await?;
    info!(
        invested = %utils::format_currency(Some(data.total_invested)),
        value = %utils::format_amount(data.current_value),
        realized = %utils::format_currency(Some(data.realized_pnl)),
        holdings = data.holdings.len(),
        "dashboard snapshot"
    );

    Ok(())
}
