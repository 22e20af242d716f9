//! Overlay window placement on the primary screen

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::randr::ConnectionExt as RandrExt;

use crate::constants::screen;
use crate::crosshair::Point;

/// Screen rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Used until a real screen has been detected
    pub const fn fallback() -> Self {
        Self::new(0, 0, screen::FALLBACK_WIDTH, screen::FALLBACK_HEIGHT)
    }

    /// Center pixel (rounds toward the top-left for even extents)
    pub fn center(&self) -> Point {
        Point::new(
            (2 * self.x + self.width - 1) / 2,
            (2 * self.y + self.height - 1) / 2,
        )
    }

    /// Convert physical pixels to logical points
    pub fn scaled(&self, pixels_per_point: f32) -> Self {
        if pixels_per_point <= 0.0 || pixels_per_point == 1.0 {
            return *self;
        }
        let scale = |v: i32| (v as f32 / pixels_per_point).round() as i32;
        Self::new(scale(self.x), scale(self.y), scale(self.width), scale(self.height))
    }
}

/// Overlay canvas extent and its top-left position on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub position: (i32, i32),
    pub extent: (i32, i32),
}

impl OverlayGeometry {
    /// `(size + 1)²` canvas whose center sits on the screen center
    pub fn centered(size: i32, screen: ScreenRect) -> Self {
        let extent = (size + 1, size + 1);
        let canvas_center = Self::center_of(extent);
        let screen_center = screen.center();
        Self {
            position: (screen_center.x - canvas_center.x, screen_center.y - canvas_center.y),
            extent,
        }
    }

    fn center_of(extent: (i32, i32)) -> Point {
        Point::new((extent.0 - 1) / 2, (extent.1 - 1) / 2)
    }

    /// Center in canvas coordinates
    pub fn canvas_center(&self) -> Point {
        Self::center_of(self.extent)
    }

    /// Center in screen coordinates
    pub fn screen_center(&self) -> Point {
        self.canvas_center().offset(self.position.0, self.position.1)
    }
}

/// Query the primary monitor from X11 (RandR primary output, else the root window)
pub fn primary_screen() -> Result<ScreenRect> {
    let (conn, screen_num) = x11rb::connect(None)
        .context("Failed to connect to X11 server. Is DISPLAY set correctly?")?;
    let root = &conn.setup().roots[screen_num];

    match primary_output_rect(&conn, root.root) {
        Ok(rect) => {
            info!(screen = ?rect, "Detected primary monitor via RandR");
            Ok(rect)
        }
        Err(e) => {
            debug!(error = ?e, "RandR primary output unavailable, using root window");
            let rect = ScreenRect::new(
                0,
                0,
                root.width_in_pixels as i32,
                root.height_in_pixels as i32,
            );
            info!(screen = ?rect, "Detected screen from X11 root window");
            Ok(rect)
        }
    }
}

fn primary_output_rect(conn: &impl Connection, root: u32) -> Result<ScreenRect> {
    let primary = conn
        .randr_get_output_primary(root)
        .context("Failed to query RandR primary output")?
        .reply()
        .context("Failed to get reply for RandR primary output")?
        .output;
    if primary == x11rb::NONE {
        bail!("No RandR primary output set");
    }

    let output = conn
        .randr_get_output_info(primary, x11rb::CURRENT_TIME)
        .context("Failed to query RandR output info")?
        .reply()
        .context("Failed to get reply for RandR output info")?;
    if output.crtc == x11rb::NONE {
        bail!("Primary output {primary} has no active CRTC");
    }

    let crtc = conn
        .randr_get_crtc_info(output.crtc, x11rb::CURRENT_TIME)
        .context("Failed to query RandR CRTC info")?
        .reply()
        .context("Failed to get reply for RandR CRTC info")?;

    Ok(ScreenRect::new(
        crtc.x as i32,
        crtc.y as i32,
        crtc.width as i32,
        crtc.height as i32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_center() {
        assert_eq!(ScreenRect::new(0, 0, 1920, 1080).center(), Point::new(959, 539));
        assert_eq!(ScreenRect::new(1920, 0, 2560, 1440).center(), Point::new(3199, 719));
        assert_eq!(ScreenRect::new(0, 0, 5, 5).center(), Point::new(2, 2));
    }

    #[test]
    fn test_default_geometry() {
        let geometry = OverlayGeometry::centered(24, ScreenRect::new(0, 0, 1920, 1080));
        assert_eq!(geometry.extent, (25, 25));
        assert_eq!(geometry.canvas_center(), Point::new(12, 12));
        assert_eq!(geometry.position, (947, 527));
    }

    #[test]
    fn test_geometry_tracks_center_for_all_sizes() {
        let screens = [
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(0, 0, 1366, 767),
            ScreenRect::new(-1280, 200, 1280, 1024),
        ];
        for screen in screens {
            for size in 8..=64 {
                let geometry = OverlayGeometry::centered(size, screen);
                assert_eq!(geometry.extent, (size + 1, size + 1));
                assert_eq!(geometry.screen_center(), screen.center());
            }
        }
    }

    #[test]
    fn test_scaled() {
        let rect = ScreenRect::new(0, 0, 3840, 2160);
        assert_eq!(rect.scaled(2.0), ScreenRect::new(0, 0, 1920, 1080));
        assert_eq!(rect.scaled(1.0), rect);
    }
}
