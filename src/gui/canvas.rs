//! egui painter backend for the crosshair renderer

use eframe::egui;

use crate::color::Rgba;
use crate::crosshair::{Canvas, CustomImage, Pen, Point};

/// Maps canvas pixels onto an egui painter region starting at `origin`
pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    texture: Option<&'a egui::TextureHandle>,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self {
            painter,
            origin,
            texture: None,
        }
    }

    /// Texture uploaded for the current custom image
    pub fn with_texture(mut self, texture: Option<&'a egui::TextureHandle>) -> Self {
        self.texture = texture;
        self
    }

    /// Center of pixel `p`
    fn pixel_center(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32 + 0.5, p.y as f32 + 0.5)
    }

    fn stroke(pen: Pen) -> egui::Stroke {
        egui::Stroke::new(pen.width, color32(pen.color))
    }
}

pub fn color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

impl Canvas for EguiCanvas<'_> {
    fn line(&mut self, from: Point, to: Point, pen: Pen) {
        self.painter.line_segment(
            [self.pixel_center(from), self.pixel_center(to)],
            Self::stroke(pen),
        );
    }

    fn point(&mut self, at: Point, pen: Pen) {
        let rect = egui::Rect::from_center_size(self.pixel_center(at), egui::Vec2::splat(pen.width));
        self.painter.rect_filled(rect, 0.0, color32(pen.color));
    }

    fn circle(&mut self, center: Point, diameter: f32, pen: Pen) {
        self.painter
            .circle_stroke(self.pixel_center(center), diameter / 2.0, Self::stroke(pen));
    }

    fn image(&mut self, top_left: Point, image: &CustomImage) {
        let Some(texture) = self.texture else {
            return;
        };
        let min = self.origin + egui::vec2(top_left.x as f32, top_left.y as f32);
        let rect = egui::Rect::from_min_size(
            min,
            egui::vec2(image.width() as f32, image.height() as f32),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        self.painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
    }
}

/// GPU texture kept in step with the overlay's decoded custom image
#[derive(Default)]
pub struct ImageTexture {
    source: Option<CustomImage>,
    handle: Option<egui::TextureHandle>,
}

impl ImageTexture {
    pub fn sync(&mut self, ctx: &egui::Context, image: Option<&CustomImage>) -> Option<&egui::TextureHandle> {
        if self.source.as_ref() != image {
            self.handle = image.map(|image| {
                ctx.load_texture(
                    "custom-crosshair",
                    egui::ColorImage::from_rgba_unmultiplied(image.size(), image.pixels()),
                    egui::TextureOptions::NEAREST,
                )
            });
            self.source = image.cloned();
        }
        self.handle.as_ref()
    }
}
