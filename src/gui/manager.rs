//! Settings window and crosshair overlay implemented with egui/eframe

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info, warn};

use super::canvas::{EguiCanvas, ImageTexture};
use super::components::{crosshair_settings, preview};
use super::constants::*;
use crate::controller::{Effect, SettingsController};
use crate::crosshair::OverlaySurface;
use crate::event::{self, AppEvent, EventSender};
use crate::hotkeys::{self, ListenerCount};
use crate::placement::{self, ScreenRect};
use crate::tray::{self, TrayHandle};
use crate::visibility::Visibility;

/// Startup options collected from the command line
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub settings_path: PathBuf,
    pub global_hotkeys: bool,
    pub start_minimized: bool,
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

/// Frames left on which the startup visibility is pushed to the window system
///
/// eframe makes the root window visible after its first frame whatever the
/// viewport builder asked for, so the state is applied on the frame after too.
struct StartupSync(u8);

impl Default for StartupSync {
    fn default() -> Self {
        Self(STARTUP_VISIBILITY_SYNC_FRAMES)
    }
}

impl StartupSync {
    fn due(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

struct CrosshairApp {
    overlay: OverlaySurface,
    controller: SettingsController,
    events: Receiver<AppEvent>,
    tray: Option<TrayHandle>,
    /// Running evdev listeners; `None` when the global hotkey never started
    hotkeys: Option<ListenerCount>,
    startup_sync: StartupSync,
    /// Detected X11 screen in physical pixels, applied once the scale factor is known
    pending_screen: Option<ScreenRect>,
    screen_detected: bool,
    image_texture: ImageTexture,
    status_message: Option<StatusMessage>,
    terminate: Arc<AtomicBool>,
    allow_close: bool,
}

impl CrosshairApp {
    fn new(cc: &CreationContext<'_>, options: LaunchOptions) -> Self {
        info!("Initializing settings window");

        let (sender, events) = event::channel(cc.egui_ctx.clone());

        let pending_screen = placement::primary_screen()
            .inspect_err(|err| warn!(error = ?err, "Cannot query primary screen from X11, waiting for window system"))
            .ok();

        let visibility = if options.start_minimized {
            Visibility::StatusIndicatorVisible
        } else {
            Visibility::OverlayVisible
        };

        let mut overlay = OverlaySurface::new(ScreenRect::fallback());
        let mut controller = SettingsController::new(options.settings_path).with_visibility(visibility);

        let status_message = match controller.load(&mut overlay) {
            Ok(_) => None,
            Err(err) => {
                error!(error = ?err, "Failed to load settings, keeping defaults");
                Some(StatusMessage {
                    text: format!("Failed to load settings: {err:#}"),
                    color: STATUS_ERROR,
                })
            }
        };

        info!(
            visibility = ?controller.visibility(),
            controls = ?controller.controls(),
            "Settings ready"
        );

        let tray = match tray::spawn_tray(sender.clone(), visibility.indicator_shown()) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(error = ?err, "Failed to start status indicator");
                None
            }
        };

        let hotkeys = if options.global_hotkeys {
            start_hotkeys(sender)
        } else {
            None
        };

        Self {
            overlay,
            controller,
            events,
            tray,
            hotkeys,
            startup_sync: StartupSync::default(),
            screen_detected: pending_screen.is_some(),
            pending_screen,
            image_texture: ImageTexture::default(),
            status_message,
            terminate: register_signals(),
            allow_close: false,
        }
    }

    fn process_events(&mut self, ctx: &egui::Context) {
        let pending: Vec<AppEvent> = self.events.try_iter().collect();
        for event in pending {
            self.dispatch(ctx, event);
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: AppEvent) {
        match self.controller.handle_event(event, &mut self.overlay) {
            Effect::None => {}
            Effect::Visibility(visibility) => self.show_visibility(ctx, visibility),
            Effect::Quit => {
                self.allow_close = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn show_visibility(&self, ctx: &egui::Context, visibility: Visibility) {
        apply_visibility(ctx, visibility, self.tray.as_ref());
    }

    fn sync_startup_visibility(&mut self, ctx: &egui::Context) {
        if self.startup_sync.due() {
            self.show_visibility(ctx, self.controller.visibility());
            ctx.request_repaint();
        }
    }

    /// Whether an evdev listener is still delivering Alt+X
    fn global_hotkeys_active(&self) -> bool {
        self.hotkeys.as_ref().is_some_and(ListenerCount::is_active)
    }

    /// Keys handled while the settings window has focus
    fn process_keys(&mut self, ctx: &egui::Context) {
        let (escape, alt_x) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.modifiers.alt && i.key_pressed(egui::Key::X),
            )
        });

        if escape {
            self.dispatch(ctx, AppEvent::EscapePressed);
        }
        // The evdev listener already sees this press when it is running
        if alt_x && !self.global_hotkeys_active() {
            self.dispatch(ctx, AppEvent::ToggleVisibility);
        }
    }

    /// Closing the window hides it into the status indicator
    fn process_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.allow_close {
            return;
        }
        if self.tray.is_none() && !self.global_hotkeys_active() {
            info!("No way to bring the window back, exiting");
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        self.dispatch(ctx, AppEvent::EscapePressed);
    }

    fn process_signals(&mut self, ctx: &egui::Context) {
        if self.terminate.load(Ordering::Relaxed) && !self.allow_close {
            info!("Termination signal received");
            self.dispatch(ctx, AppEvent::Quit);
        }
    }

    fn update_screen(&mut self, ctx: &egui::Context) {
        if let Some(screen) = self.pending_screen.take() {
            self.overlay.set_screen(screen.scaled(ctx.pixels_per_point()));
            return;
        }
        if self.screen_detected {
            return;
        }
        if let Some(size) = ctx.input(|i| i.viewport().monitor_size) {
            info!(width = size.x, height = size.y, "Using monitor size reported by window system");
            self.overlay
                .set_screen(ScreenRect::new(0, 0, size.x.round() as i32, size.y.round() as i32));
            self.screen_detected = true;
        }
    }

    fn save_settings(&mut self) {
        self.status_message = Some(match self.controller.save() {
            Ok(()) => StatusMessage {
                text: format!("Saved to {}", self.controller.settings_path().display()),
                color: STATUS_OK,
            },
            Err(err) => {
                error!(error = ?err, "Failed to save settings");
                StatusMessage {
                    text: format!("Save failed: {err:#}"),
                    color: STATUS_ERROR,
                }
            }
        });
    }

    fn settings_panel(&mut self, ctx: &egui::Context, texture: Option<&egui::TextureHandle>) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if crosshair_settings::ui(ui, self.controller.controls_mut()) {
                    self.controller.apply_to_overlay(&mut self.overlay);
                }

                ui.add_space(SECTION_SPACING);
                ui.vertical_centered(|ui| preview::ui(ui, &self.overlay, texture));
                ui.add_space(SECTION_SPACING);

                ui.horizontal_wrapped(|ui| {
                    if ui.button("Toggle Crosshair").clicked() {
                        actions.push(AppEvent::ToggleCrosshair);
                    }
                    if ui.button("Apply").clicked() {
                        self.controller.apply_changes(&mut self.overlay);
                    }
                    if ui.button("Save Settings").clicked() {
                        self.save_settings();
                    }
                    if ui.button("Close").clicked() {
                        actions.push(AppEvent::EscapePressed);
                    }
                });

                if let Some(message) = &self.status_message {
                    ui.add_space(ITEM_SPACING);
                    ui.colored_label(message.color, &message.text);
                }

                ui.add_space(SECTION_SPACING);
                ui.group(|ui| {
                    ui.label(egui::RichText::new("Tips").strong());
                    ui.label("• Alt+X: Show/hide this window");
                    ui.label("• Esc: Hide to tray");
                    ui.label("• Tray icon click: Show/hide this window");
                });
            });
        });

        for event in actions {
            self.dispatch(ctx, event);
        }
    }

    fn show_overlay(&self, ctx: &egui::Context, texture: Option<&egui::TextureHandle>) {
        if !self.overlay.config().visible {
            return;
        }

        let geometry = self.overlay.geometry();
        let builder = egui::ViewportBuilder::default()
            .with_title("crossGlobal Crosshair")
            .with_decorations(false)
            .with_transparent(true)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_mouse_passthrough(true)
            .with_taskbar(false)
            .with_resizable(false)
            .with_inner_size([geometry.extent.0 as f32, geometry.extent.1 as f32])
            .with_position([geometry.position.0 as f32, geometry.position.1 as f32]);

        let overlay = &self.overlay;
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("crosshair_overlay"),
            builder,
            |ctx, _class| {
                let painter = ctx.layer_painter(egui::LayerId::background());
                let mut canvas = EguiCanvas::new(&painter, egui::Pos2::ZERO).with_texture(texture);
                overlay.render_centered(&mut canvas);
            },
        );
    }
}

impl eframe::App for CrosshairApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_startup_visibility(ctx);
        self.process_signals(ctx);
        self.process_events(ctx);
        self.process_keys(ctx);
        self.process_close_request(ctx);
        self.update_screen(ctx);

        let texture = self
            .image_texture
            .sync(ctx, self.overlay.config().custom_image.as_ref())
            .cloned();

        self.settings_panel(ctx, texture.as_ref());
        self.show_overlay(ctx, texture.as_ref());

        if self.overlay.take_repaint() {
            ctx.request_repaint();
        }
        ctx.request_repaint_after(Duration::from_millis(SIGNAL_CHECK_INTERVAL_MS));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // The overlay viewport must stay see-through outside the crosshair
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("CrossGlobal exiting");
    }
}

fn start_hotkeys(sender: EventSender) -> Option<ListenerCount> {
    if !hotkeys::check_permissions() {
        hotkeys::print_permission_error();
        return None;
    }
    match hotkeys::spawn_listener(sender) {
        Ok(listeners) => {
            info!(listeners = listeners.active(), "Global hotkey enabled (Alt+X)");
            Some(listeners)
        }
        Err(e) => {
            error!(error = %e, "Failed to start hotkey listener");
            hotkeys::print_permission_error();
            None
        }
    }
}

/// Show the settings window or hide it into the status indicator
fn apply_visibility(ctx: &egui::Context, visibility: Visibility, tray: Option<&TrayHandle>) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(visibility.settings_shown()));
    if visibility.settings_shown() {
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }
    if let Some(tray) = tray {
        tray.set_shown(visibility.indicator_shown());
    }
}

fn register_signals() -> Arc<AtomicBool> {
    let terminate = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&terminate)) {
            warn!(signal, error = ?err, "Failed to register signal handler");
        }
    }
    terminate
}

pub fn run_gui(options: LaunchOptions) -> Result<()> {
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(WINDOW_TITLE)
            // Needed so the overlay viewport gets an alpha-capable surface
            .with_transparent(true)
            .with_visible(!options.start_minimized),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(|cc| Ok(Box::new(CrosshairApp::new(cc, options)))),
    )
    .map_err(|err| anyhow!("Failed to launch settings window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_commands(visibility: Visibility) -> Vec<egui::ViewportCommand> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            apply_visibility(ctx, visibility, None);
        });
        output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.commands.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_startup_sync_covers_first_two_frames() {
        let mut sync = StartupSync::default();
        assert!(sync.due());
        assert!(sync.due());
        assert!(!sync.due());
        assert!(!sync.due());
    }

    #[test]
    fn test_indicator_state_hides_settings_window() {
        let commands = root_commands(Visibility::StatusIndicatorVisible);
        assert!(commands.iter().any(|c| matches!(c, egui::ViewportCommand::Visible(false))));
        assert!(!commands.iter().any(|c| matches!(c, egui::ViewportCommand::Visible(true))));
    }

    #[test]
    fn test_overlay_state_shows_and_focuses_settings_window() {
        let commands = root_commands(Visibility::OverlayVisible);
        assert!(commands.iter().any(|c| matches!(c, egui::ViewportCommand::Visible(true))));
        assert!(commands.iter().any(|c| matches!(c, egui::ViewportCommand::Focus)));
    }
}
