// Builds the dashboard snapshot from the trade book.
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use shared::models::{DashboardData, Holding, Trade, TradeSide};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EngineSettings;
use crate::data::TradeStore;
use crate::error::EngineError;

// Positions below this quantity are float residue, not holdings.
const DUST: f64 = 1e-9;

#[derive(Default)]
struct Position {
    quantity: f64,
    invested: f64,
}

pub struct DashboardService {
    store: Arc<RwLock<TradeStore>>,
    settings: EngineSettings,
}

impl DashboardService {
    pub fn new(store: Arc<RwLock<TradeStore>>, settings: EngineSettings) -> Self {
        DashboardService { store, settings }
    }

    /// Current portfolio snapshot: open holdings at average cost, realized
    /// profit and loss, and the most recent trades.
    pub async fn load_dashboard_data(&self) -> Result<DashboardData, EngineError> {
        let trades = self.store.read().await.all_trades();
        Ok(Self::summarize(trades, self.settings.recent_trades_limit))
    }

    // Folds the chronological trade list into per-symbol positions. Sells
    // realize P&L against the running average cost; a sell can never close
    // more than the held quantity.
    fn summarize(trades: Vec<Trade>, recent_limit: usize) -> DashboardData {
        let mut positions: HashMap<String, Position> = HashMap::new();
        let mut realized_pnl = 0.0;

        for trade in &trades {
            let position = positions.entry(trade.symbol.clone()).or_default();
            match trade.side {
                TradeSide::Buy => {
                    position.quantity += trade.quantity;
                    position.invested += trade.notional();
                }
                TradeSide::Sell => {
                    if position.quantity <= DUST {
                        warn!(symbol = %trade.symbol, "sell without held quantity, skipping");
                        continue;
                    }
                    let sold = trade.quantity.min(position.quantity);
                    if sold < trade.quantity {
                        warn!(
                            symbol = %trade.symbol,
                            held = position.quantity,
                            requested = trade.quantity,
                            "sell exceeds held quantity, clamping"
                        );
                    }
                    let average_cost = position.invested / position.quantity;
                    realized_pnl += (trade.price - average_cost) * sold;
                    position.invested -= average_cost * sold;
                    position.quantity -= sold;
                }
            }
        }

        let mut holdings: Vec<Holding> = positions
            .into_iter()
            .filter(|(_, position)| position.quantity > DUST)
            .map(|(symbol, position)| Holding {
                symbol,
                quantity: position.quantity,
                invested: position.invested,
            })
            .collect();
        holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let total_invested: f64 = holdings.iter().map(|h| h.invested).sum();

        let mut recent_trades = trades;
        recent_trades.reverse();
        recent_trades.truncate(recent_limit);

        DashboardData {
            total_invested,
            // No live quote feed; open positions are carried at cost.
            current_value: total_invested,
            realized_pnl,
            holdings,
            recent_trades,
            as_of: Utc::now(),
        }
    }
}
