pub mod dashboard;
pub mod spinner;
pub mod toast;

pub use dashboard::{DashboardRenderer, DashboardView};
pub use spinner::SpinnerButton;
pub use toast::{Toast, ToastKind, ToastManager, ToastPhase, ToastTimings};
