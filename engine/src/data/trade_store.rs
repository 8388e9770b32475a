// In-memory trade book, grouped per symbol.
use shared::models::Trade;
use std::collections::HashMap;

pub struct TradeStore {
    // Trades per symbol, kept in chronological order. Fine for a single
    // account's history; a real broker feed would want a database.
    trades: HashMap<String, Vec<Trade>>,
}

impl TradeStore {
    pub fn new() -> Self {
        TradeStore {
            trades: HashMap::new(),
        }
    }

    /// Adds trades to their symbol buckets, skipping ids already present,
    /// and keeps each bucket chronological. Returns how many were added.
    pub fn add_trades(&mut self, new_trades: Vec<Trade>) -> usize {
        let mut added = 0;
        for trade in new_trades {
            let bucket = self.trades.entry(trade.symbol.clone()).or_default();
            if bucket.iter().any(|existing| existing.id == trade.id) {
                continue;
            }
            bucket.push(trade);
            added += 1;
        }
        for bucket in self.trades.values_mut() {
            bucket.sort_by(|a, b| (a.trade_date, a.created_at).cmp(&(b.trade_date, b.created_at)));
        }
        added
    }

    /// Trades for one symbol, optionally bounded by trade date (inclusive).
    /// `None` means the symbol has never been seen.
    pub fn trades_for_symbol(
        &self,
        symbol: &str,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) -> Option<Vec<Trade>> {
        self.trades.get(symbol).map(|trades| {
            trades
                .iter()
                .filter(|t| from.map_or(true, |start| t.trade_date >= start))
                .filter(|t| to.map_or(true, |end| t.trade_date <= end))
                .cloned()
                .collect()
        })
    }

    /// Every trade across all symbols, in chronological order.
    pub fn all_trades(&self) -> Vec<Trade> {
        let mut all: Vec<Trade> = self.trades.values().flatten().cloned().collect();
        all.sort_by(|a, b| (a.trade_date, a.created_at).cmp(&(b.trade_date, b.created_at)));
        all
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.trades.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.trades.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TradeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use shared::models::TradeSide;

    fn trade(symbol: &str, day: u32) -> Trade {
        Trade::new(
            symbol.to_string(),
            TradeSide::Buy,
            10.0,
            100.0,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn add_keeps_chronological_order() {
        let mut store = TradeStore::new();
        store.add_trades(vec![trade("INFY", 20), trade("INFY", 5), trade("INFY", 12)]);

        let days: Vec<u32> = store.all_trades().iter().map(|t| t.trade_date.day()).collect();
        assert_eq!(days, vec![5, 12, 20]);
    }

    #[test]
    fn duplicate_ids_are_skipped() {
        let mut store = TradeStore::new();
        let t = trade("TCS", 10);
        assert_eq!(store.add_trades(vec![t.clone()]), 1);
        assert_eq!(store.add_trades(vec![t]), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn trades_for_symbol_filters_by_date_range() {
        let mut store = TradeStore::new();
        store.add_trades(vec![trade("INFY", 5), trade("INFY", 12), trade("INFY", 20)]);

        let mid = store
            .trades_for_symbol(
                "INFY",
                Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
                Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            )
            .unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].trade_date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());

        assert!(store.trades_for_symbol("ABSENT", None, None).is_none());
    }

    #[test]
    fn symbols_are_sorted() {
        let mut store = TradeStore::new();
        store.add_trades(vec![trade("TCS", 1), trade("INFY", 1)]);
        assert_eq!(store.symbols(), vec!["INFY".to_string(), "TCS".to_string()]);
    }
}
