// UI configuration module
pub mod theme;

use serde::Deserialize;
use theme::Theme;

use crate::components::ToastTimings;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    pub startup: StartupConfig,
    pub toast: ToastConfig,
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub theme: String, // "dark" or "light"
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    /// How long module registration may take before startup is abandoned.
    pub module_wait_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToastConfig {
    pub entrance_ms: u64,
    pub visible_ms: u64,
    pub dismiss_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub csv_delimiter: char,
}

impl AppConfig {
    /// Loads the embedded default configuration. User-specific overrides
    /// would layer on top of this; for now the embedded file is the config.
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig = serde_json::from_str(config_str)?;
        Ok(config)
    }

    /// Theme selected by the config, falling back to dark.
    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.app.theme)
    }

    pub fn toast_timings(&self) -> ToastTimings {
        ToastTimings::from_millis(
            self.toast.entrance_ms,
            self.toast.visible_ms,
            self.toast.dismiss_ms,
        )
    }
}
