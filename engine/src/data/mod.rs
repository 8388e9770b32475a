pub mod csv_import;
pub mod trade_store;

pub use csv_import::TradeCsvImporter;
pub use trade_store::TradeStore;
