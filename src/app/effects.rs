//! UI-effect collaborators injected into the view-model

use tokio::sync::mpsc;

use crate::messages::UiEffect;

/// Side effects on the presentation layer that the view-model requests
/// but does not perform itself
pub trait UiEffects: Send {
    fn disable_input(&mut self);
    fn enable_input(&mut self);
    fn notify_transient(&mut self, message: &str);
    fn scroll_to_top(&mut self);
}

/// Discards every effect
#[derive(Debug, Default)]
pub struct NoopEffects;

impl UiEffects for NoopEffects {
    fn disable_input(&mut self) {}
    fn enable_input(&mut self) {}
    fn notify_transient(&mut self, _message: &str) {}
    fn scroll_to_top(&mut self) {}
}

/// Forwards effects to the UI loop over a channel
pub struct ChannelEffects {
    tx: mpsc::UnboundedSender<UiEffect>,
}

impl ChannelEffects {
    pub fn new(tx: mpsc::UnboundedSender<UiEffect>) -> Self {
        ChannelEffects { tx }
    }

    fn send(&self, effect: UiEffect) {
        if self.tx.send(effect).is_err() {
            tracing::debug!("UI loop gone, dropping effect");
        }
    }
}

impl UiEffects for ChannelEffects {
    fn disable_input(&mut self) {
        self.send(UiEffect::DisableInput);
    }

    fn enable_input(&mut self) {
        self.send(UiEffect::EnableInput);
    }

    fn notify_transient(&mut self, message: &str) {
        self.send(UiEffect::Notify(message.to_string()));
    }

    fn scroll_to_top(&mut self) {
        self.send(UiEffect::ScrollToTop);
    }
}
