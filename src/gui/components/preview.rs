//! Live crosshair preview

use eframe::egui;

use crate::crosshair::{OverlaySurface, Point};
use crate::gui::canvas::EguiCanvas;
use crate::gui::constants::*;

/// Paint the overlay's crosshair into a fixed-size preview square
pub fn ui(ui: &mut egui::Ui, overlay: &OverlaySurface, texture: Option<&egui::TextureHandle>) {
    let (response, painter) =
        ui.allocate_painter(egui::Vec2::splat(PREVIEW_SIZE), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 4.0, PREVIEW_BACKGROUND);

    let extent = PREVIEW_SIZE as i32;
    let center = Point::new((extent - 1) / 2, (extent - 1) / 2);
    let clipped = painter.with_clip_rect(rect);
    let mut canvas = EguiCanvas::new(&clipped, rect.min).with_texture(texture);
    overlay.render(&mut canvas, center);
}
