//! Configuration management for CrossGlobal
//!
//! The only persisted state is the flat crosshair settings document.

pub mod settings;

pub use settings::SettingsDocument;
