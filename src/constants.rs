//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Control ranges and overlay construction defaults
pub mod crosshair {
    /// Overall bounding dimension in pixels
    pub const SIZE_MIN: i32 = 8;
    pub const SIZE_MAX: i32 = 64;

    /// Pen width for drawn lines
    pub const WIDTH_MIN: i32 = 1;
    pub const WIDTH_MAX: i32 = 10;

    /// Half-length of each arm (shared by cross and x styles)
    pub const ARM_MIN: i32 = 1;
    pub const ARM_MAX: i32 = 20;

    /// Values the overlay is constructed with before any settings are applied
    pub const INITIAL_SIZE: i32 = 24;
    pub const INITIAL_WIDTH: i32 = 2;
    pub const INITIAL_ARM_LENGTH: i32 = 10;
    pub const INITIAL_SHOW_OUTLINE: bool = true;
}

/// Outline ring styling (independent of the configured pen)
pub mod outline {
    use crate::color::Rgba;

    /// Semi-transparent black
    pub const COLOR: Rgba = Rgba::new(0, 0, 0, 100);

    pub const WIDTH: f32 = 2.0;
}

/// Defaults used for keys missing from the settings document
pub mod defaults {
    pub const SIZE: i32 = 24;
    pub const WIDTH: i32 = 1;
    pub const CROSS_LENGTH: i32 = 10;
    pub const X_LENGTH: i32 = 10;
    pub const COLOR: &str = "#FFFFFF";
    pub const SHOW_OUTLINE: bool = false;
    pub const CUSTOM_IMAGE: &str = "";
}

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "crossglobal";

    /// Settings document filename
    pub const FILENAME: &str = "settings.json";
}

/// Input event constants (from evdev)
pub mod input {
    /// Key press event value
    pub const KEY_PRESS: i32 = 1;
}

/// Filesystem paths
pub mod paths {
    /// Linux input device directory
    pub const DEV_INPUT: &str = "/dev/input";
}

/// Input group permissions for the global accelerator
pub mod permissions {
    pub const INPUT_GROUP: &str = "input";
    pub const ADD_TO_INPUT_GROUP: &str = "sudo usermod -aG input $USER";
}

/// Status indicator (tray) identity and icon
pub mod tray {
    pub const ID: &str = "crossglobal";
    pub const TITLE: &str = "CrossGlobal";

    /// Icon edge in pixels
    pub const ICON_SIZE: u32 = 22;

    /// Arm length of the cross drawn into the icon
    pub const ICON_ARM_LENGTH: i32 = 7;
}

/// Screen fallback when neither X11 nor the windowing backend reports a size
pub mod screen {
    pub const FALLBACK_WIDTH: i32 = 1920;
    pub const FALLBACK_HEIGHT: i32 = 1080;
}
