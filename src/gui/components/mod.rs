pub mod crosshair_settings;
pub mod preview;
