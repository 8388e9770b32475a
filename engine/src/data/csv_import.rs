use csv::{ReaderBuilder, StringRecord};
use shared::models::{Trade, TradeSide};
use shared::utils::{self, indian_format};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;

use crate::config::EngineSettings;
use crate::error::EngineError;

// CSV Header: Symbol,Side,Quantity,Price,Trade Date
// Example Row: INFY,buy,10,"₹1,500.50",15-01-2024
pub struct TradeCsvImporter {
    delimiter: u8,
    default_symbol: String,
}

impl TradeCsvImporter {
    /// Builds an importer from the engine settings. The `csv` reader works
    /// on bytes, so a delimiter outside ASCII is a configuration error
    /// rather than a silent truncation.
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        if !settings.csv_delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "CSV delimiter '{}' must be a single ASCII character",
                settings.csv_delimiter
            )));
        }
        Ok(TradeCsvImporter {
            delimiter: settings.csv_delimiter as u8,
            default_symbol: settings.default_symbol.clone(),
        })
    }

    /// Reads a statement CSV into trades. Columns are located by header
    /// name, so column order does not matter; a row with a missing or
    /// unreadable field fails the import with its line number.
    pub fn import_file(&self, file_path: &str) -> Result<Vec<Trade>, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut trades = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            // Statement exports sometimes drop the symbol column entirely.
            let symbol = match Self::get_field(&record, &headers, "Symbol") {
                Some(s) if !s.trim().is_empty() => s.trim().to_string(),
                _ => self.default_symbol.clone(),
            };

            let side_str = Self::get_field(&record, &headers, "Side")
                .ok_or_else(|| missing_field("Side", line))?;
            let quantity_str = Self::get_field(&record, &headers, "Quantity")
                .ok_or_else(|| missing_field("Quantity", line))?;
            let price_str = Self::get_field(&record, &headers, "Price")
                .ok_or_else(|| missing_field("Price", line))?;
            let date_str = Self::get_field(&record, &headers, "Trade Date")
                .ok_or_else(|| missing_field("Trade Date", line))?;

            let side = Self::parse_side(side_str).map_err(|e| row_error("Side", line, e))?;

            let quantity = indian_format::parse_amount(quantity_str)
                .map_err(|e| row_error("Quantity", line, e))?;
            if quantity <= 0.0 {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Non-positive quantity {} at line {}",
                    quantity, line
                )));
            }

            let price = indian_format::parse_amount(price_str)
                .map_err(|e| row_error("Price", line, e))?;
            if price < 0.0 {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Negative price {} at line {}",
                    price, line
                )));
            }

            let trade_date = utils::parse_csv_date(date_str).ok_or_else(|| {
                row_error("Trade Date", line, format!("unrecognized value '{date_str}'"))
            })?;

            trades.push(Trade::new(symbol, side, quantity, price, trade_date));
        }
        Ok(trades)
    }

    // Helper to get a field by header name, so imports survive column
    // reordering. A header that is absent altogether yields None.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
    }

    fn parse_side(s: &str) -> Result<TradeSide, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            other => Err(format!("unknown trade side '{other}'")),
        }
    }
}

fn missing_field(name: &str, line: usize) -> EngineError {
    EngineError::CsvDataFormatError(format!(
        "Missing '{name}' field in CSV record at line {line}"
    ))
}

fn row_error(field: &str, line: usize, detail: impl Display) -> EngineError {
    EngineError::CsvDataFormatError(format!("Error parsing '{field}' at line {line}: {detail}"))
}
