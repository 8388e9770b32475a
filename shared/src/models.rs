use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils;

/// Direction of an executed order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// +1.0 for buys, -1.0 for sells.
    pub fn sign(&self) -> f64 {
        match self {
            TradeSide::Buy => 1.0,
            TradeSide::Sell => -1.0,
        }
    }
}

/// One executed order from a trade statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub trade_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        symbol: impl Into<String>,
        side: TradeSide,
        quantity: f64,
        price: f64,
        trade_date: NaiveDate,
    ) -> Self {
        Trade {
            id: utils::generate_uuid(),
            symbol: symbol.into(),
            side,
            quantity,
            price,
            trade_date,
            created_at: Utc::now(),
        }
    }

    /// Gross value of the order in rupees, unsigned.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Aggregated open position for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    /// Net cost of the open quantity in rupees.
    pub invested: f64,
}

/// Everything the dashboard screen renders in one load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub total_invested: f64,
    pub current_value: f64,
    pub realized_pnl: f64,
    pub holdings: Vec<Holding>,
    /// Most recent first, bounded by the engine's recent-trades limit.
    pub recent_trades: Vec<Trade>,
    pub as_of: DateTime<Utc>,
}

impl DashboardData {
    pub fn empty() -> Self {
        DashboardData {
            total_invested: 0.0,
            current_value: 0.0,
            realized_pnl: 0.0,
            holdings: Vec::new(),
            recent_trades: Vec::new(),
            as_of: Utc::now(),
        }
    }
}

/// Authenticated session owner as reported by the auth module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        User {
            id: utils::generate_uuid(),
            email: email.into(),
        }
    }
}
