// Global UI state, written by components and read by the shell.
use crate::components::dashboard::DashboardView;
use crate::config::theme::Theme;
use shared::models::User;

#[derive(Debug, Clone)]
pub struct AppState {
    pub current_theme: Theme,
    /// BCP 47 tag for number and date rendering, e.g. "en-IN".
    pub language: String,
    /// Session owner shown in the header, if anyone is signed in.
    pub current_user: Option<User>,
    /// Last rendered dashboard; None until the first successful load.
    pub dashboard: Option<DashboardView>,
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            current_theme: Theme::default(),
            language: "en-IN".to_string(),
            current_user: None,
            dashboard: None,
            last_error: None,
        }
    }
}

impl AppState {
    pub fn set_session(&mut self, user: Option<User>) {
        self.current_user = user;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.current_theme = theme;
    }

    /// Takes the pending error, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }
}
