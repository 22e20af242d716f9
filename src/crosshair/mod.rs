//! Overlay surface: crosshair configuration, placement and rendering

pub mod image;
pub mod raster;
pub mod render;

pub use self::image::CustomImage;
pub use self::render::{render, Canvas, Pen, Point};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::color::Rgba;
use crate::constants::crosshair;
use crate::placement::{OverlayGeometry, ScreenRect};

/// Crosshair shape selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrosshairStyle {
    #[default]
    #[serde(rename = "cross")]
    Cross,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "dot")]
    Dot,
    #[serde(rename = "custom image")]
    CustomImage,
}

impl CrosshairStyle {
    pub const ALL: [CrosshairStyle; 4] = [
        CrosshairStyle::Cross,
        CrosshairStyle::X,
        CrosshairStyle::Dot,
        CrosshairStyle::CustomImage,
    ];

    /// Label shown in the style selector
    pub fn label(self) -> &'static str {
        match self {
            CrosshairStyle::Cross => "Cross",
            CrosshairStyle::X => "X",
            CrosshairStyle::Dot => "Dot",
            CrosshairStyle::CustomImage => "Custom Image",
        }
    }
}

impl fmt::Display for CrosshairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visual configuration of the crosshair
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairConfig {
    pub size: i32,
    pub stroke_width: i32,
    pub color: Rgba,
    pub style: CrosshairStyle,
    pub cross_length: i32,
    pub x_length: i32,
    pub show_outline: bool,
    pub custom_image_path: Option<PathBuf>,
    /// Decoded from `custom_image_path`; `None` when unset or undecodable
    pub custom_image: Option<CustomImage>,
    /// Whether the overlay window currently shows the crosshair
    pub visible: bool,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            size: crosshair::INITIAL_SIZE,
            stroke_width: crosshair::INITIAL_WIDTH,
            color: Rgba::WHITE,
            style: CrosshairStyle::Cross,
            cross_length: crosshair::INITIAL_ARM_LENGTH,
            x_length: crosshair::INITIAL_ARM_LENGTH,
            show_outline: crosshair::INITIAL_SHOW_OUTLINE,
            custom_image_path: None,
            custom_image: None,
            visible: true,
        }
    }
}

/// The always-on-top crosshair surface
///
/// Owns the single `CrosshairConfig` of the process. The settings controller
/// and the preview only ever borrow it.
#[derive(Debug)]
pub struct OverlaySurface {
    config: CrosshairConfig,
    screen: ScreenRect,
    geometry: OverlayGeometry,
    repaint_requested: bool,
}

impl OverlaySurface {
    pub fn new(screen: ScreenRect) -> Self {
        let config = CrosshairConfig::default();
        let geometry = OverlayGeometry::centered(config.size, screen);
        info!(size = config.size, screen = ?screen, geometry = ?geometry, "Created overlay surface");
        Self {
            config,
            screen,
            geometry,
            repaint_requested: true,
        }
    }

    pub fn config(&self) -> &CrosshairConfig {
        &self.config
    }

    /// Window extent and position on screen
    pub fn geometry(&self) -> OverlayGeometry {
        self.geometry
    }

    /// Paint the crosshair into `canvas`
    pub fn render(&self, canvas: &mut impl Canvas, center: Point) {
        render(&self.config, canvas, center);
    }

    /// Paint the crosshair at the center of the overlay's own canvas
    pub fn render_centered(&self, canvas: &mut impl Canvas) {
        self.render(canvas, self.geometry.canvas_center());
    }

    /// Consume the pending repaint flag
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Resize the canvas to `size + 1` and recenter on the primary screen
    pub fn set_size(&mut self, size: i32) {
        self.config.size = size;
        self.recenter();
    }

    /// Move to a different screen rectangle (e.g. once the real screen is known)
    pub fn set_screen(&mut self, screen: ScreenRect) {
        if self.screen != screen {
            info!(screen = ?screen, "Primary screen changed");
            self.screen = screen;
            self.recenter();
        }
    }

    fn recenter(&mut self) {
        self.geometry = OverlayGeometry::centered(self.config.size, self.screen);
        debug!(size = self.config.size, geometry = ?self.geometry, center = ?self.geometry.screen_center(), "Recentered overlay");
        self.request_repaint();
    }

    pub fn set_stroke_width(&mut self, width: i32) {
        self.config.stroke_width = width;
        self.request_repaint();
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.config.color = color;
        self.request_repaint();
    }

    pub fn set_show_outline(&mut self, show: bool) {
        self.config.show_outline = show;
        self.request_repaint();
    }

    pub fn set_style(&mut self, style: CrosshairStyle) {
        self.config.style = style;
        self.request_repaint();
    }

    pub fn set_cross_length(&mut self, length: i32) {
        self.config.cross_length = length;
        self.request_repaint();
    }

    pub fn set_x_length(&mut self, length: i32) {
        self.config.x_length = length;
        self.request_repaint();
    }

    /// Set the custom image path and decode it right away
    ///
    /// A path that cannot be decoded leaves no image; this never fails.
    pub fn set_custom_image(&mut self, path: Option<&Path>) {
        self.config.custom_image_path = path.map(Path::to_path_buf);
        self.config.custom_image = path.and_then(|path| match CustomImage::load(path) {
            Ok(image) => {
                info!(path = %path.display(), width = image.width(), height = image.height(), "Loaded custom crosshair image");
                Some(image)
            }
            Err(e) => {
                warn!(path = %path.display(), error = ?e, "Custom crosshair image unavailable");
                None
            }
        });
        self.request_repaint();
    }

    /// Flip whether the crosshair itself is shown
    pub fn toggle_crosshair(&mut self) -> bool {
        self.config.visible = !self.config.visible;
        info!(visible = self.config.visible, "Toggled crosshair");
        self.request_repaint();
        self.config.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crosshair::image::tests::write_png;

    fn screen() -> ScreenRect {
        ScreenRect::new(0, 0, 1920, 1080)
    }

    #[test]
    fn test_construction_defaults() {
        let overlay = OverlaySurface::new(screen());
        let config = overlay.config();
        assert_eq!(config.size, 24);
        assert_eq!(config.stroke_width, 2);
        assert_eq!(config.color, Rgba::WHITE);
        assert_eq!(config.style, CrosshairStyle::Cross);
        assert!(config.show_outline);
        assert_eq!((config.cross_length, config.x_length), (10, 10));
        assert!(config.custom_image.is_none());
        assert!(config.visible);
    }

    #[test]
    fn test_size_change_resizes_and_recenters() {
        let mut overlay = OverlaySurface::new(screen());
        for size in crosshair::SIZE_MIN..=crosshair::SIZE_MAX {
            overlay.set_size(size);
            let geometry = overlay.geometry();
            assert_eq!(geometry.extent, (size + 1, size + 1));
            assert_eq!(geometry.screen_center(), screen().center());
        }
    }

    #[test]
    fn test_style_switch_keeps_lengths() {
        let mut overlay = OverlaySurface::new(screen());
        overlay.set_cross_length(3);
        overlay.set_x_length(17);
        overlay.set_style(CrosshairStyle::X);
        overlay.set_style(CrosshairStyle::Dot);
        assert_eq!(overlay.config().cross_length, 3);
        assert_eq!(overlay.config().x_length, 17);
    }

    #[test]
    fn test_custom_image_follows_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reticle.png");
        write_png(&path, 5, 5, [255, 0, 0, 255]);
        let mut overlay = OverlaySurface::new(screen());

        overlay.set_custom_image(Some(&path));
        assert_eq!(overlay.config().custom_image.as_ref().map(|i| i.width()), Some(5));

        overlay.set_custom_image(Some(Path::new("/nonexistent/reticle.png")));
        assert!(overlay.config().custom_image.is_none());
        assert_eq!(
            overlay.config().custom_image_path.as_deref(),
            Some(Path::new("/nonexistent/reticle.png"))
        );

        overlay.set_custom_image(Some(&path));
        overlay.set_custom_image(None);
        assert!(overlay.config().custom_image.is_none());
        assert!(overlay.config().custom_image_path.is_none());
    }

    #[test]
    fn test_mutations_request_repaint() {
        let mut overlay = OverlaySurface::new(screen());
        assert!(overlay.take_repaint());
        assert!(!overlay.take_repaint());

        overlay.set_color(Rgba::opaque(1, 2, 3));
        assert!(overlay.take_repaint());
    }

    #[test]
    fn test_toggle_crosshair() {
        let mut overlay = OverlaySurface::new(screen());
        assert!(!overlay.toggle_crosshair());
        assert!(overlay.toggle_crosshair());
    }

    #[test]
    fn test_style_serde_names() {
        let names: Vec<String> = CrosshairStyle::ALL
            .iter()
            .map(|style| serde_json::to_string(style).unwrap())
            .collect();
        assert_eq!(names, vec!["\"cross\"", "\"x\"", "\"dot\"", "\"custom image\""]);
    }
}
