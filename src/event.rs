//! Inbound events from the hotkey listener, the tray and the settings window

use std::sync::mpsc::{self, Receiver, Sender};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Global accelerator (Alt+X)
    ToggleVisibility,
    /// Escape while the settings surface has focus
    EscapePressed,
    /// Primary activation of the status indicator
    IndicatorActivated,
    /// "Show Settings" from the tray menu
    ShowSettings,
    /// "Toggle Crosshair" button
    ToggleCrosshair,
    Quit,
}

/// Sends events to the UI thread and wakes it up
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<AppEvent>,
    ctx: egui::Context,
}

impl EventSender {
    pub fn send(&self, event: AppEvent) {
        debug!(event = ?event, "Dispatching event");
        // Receiver only disappears while the app is shutting down
        if self.tx.send(event).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

pub fn channel(ctx: egui::Context) -> (EventSender, Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx, ctx }, rx)
}
