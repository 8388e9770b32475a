// Engine settings, loaded from a JSON file or falling back to defaults.
use crate::error::EngineError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Symbol assigned to imported rows that carry none.
    pub default_symbol: String,
    /// How many trades the dashboard lists, newest first.
    pub recent_trades_limit: usize,
    /// Field delimiter for statement CSV files.
    pub csv_delimiter: char,
}

impl EngineSettings {
    /// Reads settings from a JSON file. Missing keys keep their defaults;
    /// an unreadable or malformed file is a configuration error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("failed to parse '{}': {}", path.display(), e))
        })
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_symbol: "UNKNOWN".to_string(),
            recent_trades_limit: 10,
            csv_delimiter: ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_sensible() {
        let settings = EngineSettings::default();
        assert_eq!(settings.default_symbol, "UNKNOWN");
        assert_eq!(settings.recent_trades_limit, 10);
        assert_eq!(settings.csv_delimiter, ',');
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "recent_trades_limit": 25 }}"#).unwrap();

        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.recent_trades_limit, 25);
        assert_eq!(settings.default_symbol, "UNKNOWN");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let err = EngineSettings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = EngineSettings::from_file("/nonexistent/engine.json").unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }
}
