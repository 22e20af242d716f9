//! Status indicator via D-Bus StatusNotifierItem (ksni)
//!
//! The tray runs on its own thread with a single-threaded tokio runtime.
//! Show/hide requests from the UI thread arrive over a tokio channel; the
//! tray reports activations back through the regular [`EventSender`].

use anyhow::{Context, Result};
use ksni::menu::{MenuItem, StandardItem};
use ksni::TrayMethods;
use std::thread;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::constants::tray;
use crate::crosshair::raster::Pixmap;
use crate::crosshair::{render, CrosshairConfig, CrosshairStyle};
use crate::event::{AppEvent, EventSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrayCommand {
    SetShown(bool),
}

/// Handle used by the UI thread to show or hide the indicator
pub struct TrayHandle {
    commands: UnboundedSender<TrayCommand>,
}

impl TrayHandle {
    pub fn set_shown(&self, shown: bool) {
        if self.commands.send(TrayCommand::SetShown(shown)).is_err() {
            warn!(shown, "Tray thread is gone, cannot update status indicator");
        }
    }
}

struct IndicatorTray {
    events: EventSender,
    shown: bool,
    icon: ksni::Icon,
}

impl ksni::Tray for IndicatorTray {
    fn id(&self) -> String {
        tray::ID.to_string()
    }

    fn title(&self) -> String {
        tray::TITLE.to_string()
    }

    fn status(&self) -> ksni::Status {
        if self.shown {
            ksni::Status::Active
        } else {
            ksni::Status::Passive
        }
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![self.icon.clone()]
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: tray::TITLE.to_string(),
            description: "Alt+X toggles the settings window".to_string(),
            ..Default::default()
        }
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.events.send(AppEvent::IndicatorActivated);
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            StandardItem {
                label: "Show Settings".to_string(),
                activate: Box::new(|tray: &mut Self| tray.events.send(AppEvent::ShowSettings)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "Quit".to_string(),
                icon_name: "application-exit".to_string(),
                activate: Box::new(|tray: &mut Self| tray.events.send(AppEvent::Quit)),
                ..Default::default()
            }
            .into(),
        ]
    }
}

/// Draw the indicator icon with the crosshair renderer
fn indicator_icon() -> ksni::Icon {
    let mut pixmap = Pixmap::new(tray::ICON_SIZE, tray::ICON_SIZE);
    let config = CrosshairConfig {
        size: tray::ICON_SIZE as i32 - 2,
        stroke_width: 2,
        style: CrosshairStyle::Cross,
        cross_length: tray::ICON_ARM_LENGTH,
        show_outline: true,
        ..CrosshairConfig::default()
    };
    let center = pixmap.center();
    render(&config, &mut pixmap, center);

    ksni::Icon {
        width: pixmap.width() as i32,
        height: pixmap.height() as i32,
        data: pixmap.to_argb32(),
    }
}

/// Start the status indicator on a background thread
pub fn spawn_tray(events: EventSender, shown: bool) -> Result<TrayHandle> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("tray".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!(error = ?err, "Failed to build tokio runtime for tray icon");
                    return;
                }
            };
            runtime.block_on(run_tray(events, shown, rx));
        })
        .context("Failed to spawn tray thread")?;

    Ok(TrayHandle { commands: tx })
}

async fn run_tray(events: EventSender, shown: bool, mut commands: UnboundedReceiver<TrayCommand>) {
    let indicator = IndicatorTray {
        events,
        shown,
        icon: indicator_icon(),
    };

    let handle = match indicator.spawn().await {
        Ok(handle) => handle,
        Err(err) => {
            error!(error = ?err, "Failed to register status indicator, is a StatusNotifier host running?");
            return;
        }
    };
    info!(shown, "Status indicator registered");

    while let Some(command) = commands.recv().await {
        match command {
            TrayCommand::SetShown(shown) => {
                debug!(shown, "Updating status indicator");
                handle.update(|tray: &mut IndicatorTray| tray.shown = shown).await;
            }
        }
    }

    handle.shutdown().await;
    info!("Status indicator stopped");
}
