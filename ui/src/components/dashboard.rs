// Renders engine numbers into the strings the dashboard screen shows.
use crate::services::DashboardUi;
use crate::state::AppState;
use parking_lot::RwLock;
use shared::models::{DashboardData, Holding, Trade, TradeSide};
use shared::utils;
use std::sync::Arc;
use tracing::debug;

/// The dashboard as displayed: every figure already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_invested: String,
    pub current_value: String,
    pub realized_pnl: String,
    pub holding_rows: Vec<HoldingRow>,
    pub trade_rows: Vec<TradeRow>,
    pub as_of: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub quantity: String,
    pub invested: String,
}

impl HoldingRow {
    fn from_holding(holding: &Holding) -> Self {
        HoldingRow {
            symbol: holding.symbol.clone(),
            quantity: holding.quantity.to_string(),
            invested: utils::format_currency(Some(holding.invested)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub symbol: String,
    pub side: String,
    /// Gross value, compact, negative for sells.
    pub value: String,
    pub date: String,
}

impl TradeRow {
    fn from_trade(trade: &Trade) -> Self {
        TradeRow {
            symbol: trade.symbol.clone(),
            side: match trade.side {
                TradeSide::Buy => "BUY".to_string(),
                TradeSide::Sell => "SELL".to_string(),
            },
            value: utils::format_amount(trade.side.sign() * trade.notional()),
            date: utils::format_date_for_display(&trade.trade_date.to_string()),
        }
    }
}

/// Writes rendered dashboards into the shared [`AppState`].
pub struct DashboardRenderer {
    state: Arc<RwLock<AppState>>,
}

impl DashboardRenderer {
    pub fn new(state: Arc<RwLock<AppState>>) -> Self {
        DashboardRenderer { state }
    }

    fn render(data: &DashboardData) -> DashboardView {
        DashboardView {
            total_invested: utils::format_currency(Some(data.total_invested)),
            current_value: utils::format_amount(data.current_value),
            realized_pnl: utils::format_currency(Some(data.realized_pnl)),
            holding_rows: data.holdings.iter().map(HoldingRow::from_holding).collect(),
            trade_rows: data.recent_trades.iter().map(TradeRow::from_trade).collect(),
            as_of: utils::format_date(&data.as_of.format("%Y-%m-%dT%H:%M:%S").to_string(), true),
        }
    }
}

impl DashboardUi for DashboardRenderer {
    fn render_dashboard(&self, data: &DashboardData) {
        let view = Self::render(data);
        debug!(
            holdings = view.holding_rows.len(),
            trades = view.trade_rows.len(),
            "dashboard rendered"
        );
        self.state.write().dashboard = Some(view);
    }

    fn show_error(&self, message: &str) {
        self.state.write().last_error = Some(message.to_string());
    }
}
