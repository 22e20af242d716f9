//! egui front end: settings window, live preview and the overlay viewport

mod canvas;
mod components;
mod constants;
mod manager;

pub use manager::{run_gui, LaunchOptions};
