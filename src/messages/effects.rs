//! UI effects - side effects requested by the App layer, applied by the UI loop

/// A presentation side effect the view-model cannot perform itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    DisableInput,
    EnableInput,
    /// Short-lived notification (toast)
    Notify(String),
    ScrollToTop,
}
