//! Settings controller
//!
//! Holds the editable control values that mirror the overlay's crosshair
//! configuration, pushes them into the overlay on request and persists them
//! as a [`SettingsDocument`]. Syncing is explicit in both directions: editing
//! a control never touches the overlay until `apply_to_overlay` runs.

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::color::Rgba;
use crate::config::SettingsDocument;
use crate::constants::crosshair;
use crate::crosshair::{CrosshairStyle, OverlaySurface};
use crate::event::AppEvent;
use crate::visibility::Visibility;

/// Control values shown in the settings surface
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsControls {
    pub size: i32,
    pub width: i32,
    pub cross_length: i32,
    pub x_length: i32,
    pub color: Rgba,
    pub show_outline: bool,
    pub style: CrosshairStyle,
    pub custom_image: Option<PathBuf>,
}

impl Default for SettingsControls {
    fn default() -> Self {
        Self::from_document(&SettingsDocument::default())
    }
}

impl SettingsControls {
    /// Controls clamp whatever the document holds into their ranges
    pub fn from_document(doc: &SettingsDocument) -> Self {
        let mut controls = Self {
            size: doc.size,
            width: doc.width,
            cross_length: doc.cross_length,
            x_length: doc.x_length,
            color: doc.color,
            show_outline: doc.show_outline,
            style: doc.style,
            custom_image: Some(PathBuf::from(&doc.custom_image))
                .filter(|path| !path.as_os_str().is_empty()),
        };
        controls.clamp_to_ranges();
        controls
    }

    pub fn to_document(&self) -> SettingsDocument {
        SettingsDocument {
            size: self.size,
            width: self.width,
            cross_length: self.cross_length,
            x_length: self.x_length,
            color: self.color,
            show_outline: self.show_outline,
            style: self.style,
            custom_image: self
                .custom_image
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn clamp_to_ranges(&mut self) {
        self.size = self.size.clamp(crosshair::SIZE_MIN, crosshair::SIZE_MAX);
        self.width = self.width.clamp(crosshair::WIDTH_MIN, crosshair::WIDTH_MAX);
        self.cross_length = self.cross_length.clamp(crosshair::ARM_MIN, crosshair::ARM_MAX);
        self.x_length = self.x_length.clamp(crosshair::ARM_MIN, crosshair::ARM_MAX);
    }
}

/// What the GUI has to do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Visibility(Visibility),
    Quit,
}

pub struct SettingsController {
    controls: SettingsControls,
    visibility: Visibility,
    settings_path: PathBuf,
}

impl SettingsController {
    pub fn new(settings_path: PathBuf) -> Self {
        Self {
            controls: SettingsControls::default(),
            visibility: Visibility::default(),
            settings_path,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn controls(&self) -> &SettingsControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut SettingsControls {
        &mut self.controls
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn settings_path(&self) -> &std::path::Path {
        &self.settings_path
    }

    /// Push every control into the overlay
    ///
    /// The custom image is only decoded again when its path changed.
    pub fn apply_to_overlay(&mut self, overlay: &mut OverlaySurface) {
        self.apply(overlay, false);
    }

    /// Like [`Self::apply_to_overlay`] but always re-decodes the custom image
    pub fn apply_changes(&mut self, overlay: &mut OverlaySurface) {
        self.apply(overlay, true);
    }

    fn apply(&mut self, overlay: &mut OverlaySurface, reload_image: bool) {
        self.controls.clamp_to_ranges();
        let controls = &self.controls;

        overlay.set_size(controls.size);
        overlay.set_stroke_width(controls.width);
        overlay.set_cross_length(controls.cross_length);
        overlay.set_x_length(controls.x_length);
        overlay.set_show_outline(controls.show_outline);
        overlay.set_color(controls.color);
        overlay.set_style(controls.style);
        if reload_image || overlay.config().custom_image_path != controls.custom_image {
            overlay.set_custom_image(controls.custom_image.as_deref());
        }
        debug!(controls = ?controls, "Applied controls to overlay");
    }

    /// Copy the document into the controls, then apply them
    pub fn load_from_document(&mut self, doc: &SettingsDocument, overlay: &mut OverlaySurface) {
        self.controls = SettingsControls::from_document(doc);
        self.apply_changes(overlay);
    }

    /// Write the current control values to the settings file
    pub fn save(&self) -> Result<()> {
        self.controls.to_document().save(&self.settings_path)
    }

    /// Load the settings file into controls and overlay
    ///
    /// A missing file is not an error: controls keep their defaults and the
    /// overlay is synced to them. Returns whether a document was applied.
    pub fn load(&mut self, overlay: &mut OverlaySurface) -> Result<bool> {
        match SettingsDocument::load(&self.settings_path)? {
            Some(doc) => {
                self.load_from_document(&doc, overlay);
                Ok(true)
            }
            None => {
                self.apply_to_overlay(overlay);
                Ok(false)
            }
        }
    }

    /// Single entry point for hotkey, tray and keyboard events
    pub fn handle_event(&mut self, event: AppEvent, overlay: &mut OverlaySurface) -> Effect {
        let next = match event {
            AppEvent::ToggleVisibility | AppEvent::IndicatorActivated => self.visibility.toggled(),
            AppEvent::EscapePressed => Visibility::StatusIndicatorVisible,
            AppEvent::ShowSettings => Visibility::OverlayVisible,
            AppEvent::ToggleCrosshair => {
                overlay.toggle_crosshair();
                return Effect::None;
            }
            AppEvent::Quit => {
                info!("Quit requested");
                return Effect::Quit;
            }
        };

        if next == self.visibility {
            return Effect::None;
        }
        info!(event = ?event, from = ?self.visibility, to = ?next, "Visibility changed");
        self.visibility = next;
        Effect::Visibility(next)
    }
}
