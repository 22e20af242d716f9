//! GUI-specific constants for layout, status colors and intervals

use egui;

/// Settings window dimensions
pub const WINDOW_WIDTH: f32 = 360.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const WINDOW_MIN_WIDTH: f32 = 300.0;
pub const WINDOW_MIN_HEIGHT: f32 = 560.0;

pub const WINDOW_TITLE: &str = "crossGlobal Settings";

/// Live preview canvas edge
pub const PREVIEW_SIZE: f32 = 200.0;
pub const PREVIEW_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(60, 60, 60);

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// How often to check for termination signals while idle
pub const SIGNAL_CHECK_INTERVAL_MS: u64 = 500;

/// Frames on which the startup visibility is applied
pub const STARTUP_VISIBILITY_SYNC_FRAMES: u8 = 2;
