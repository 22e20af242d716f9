//! Software canvas used to draw the tray icon

use crate::color::Rgba;

use super::image::CustomImage;
use super::render::{Canvas, Pen, Point};

/// Fixed-size RGBA pixel buffer, transparent on creation
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas center, rounded toward the top-left
    pub fn center(&self) -> Point {
        Point::new((self.width as i32 - 1) / 2, (self.height as i32 - 1) / 2)
    }

    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Square brush of the pen width centered on `at`
    fn stamp(&mut self, at: Point, pen: Pen) {
        let width = pen.width.round().max(1.0) as i32;
        let lo = -(width - 1) / 2;
        let hi = width / 2;
        for dy in lo..=hi {
            for dx in lo..=hi {
                self.stamp_cell(at.offset(dx, dy), pen.color);
            }
        }
    }

    fn stamp_cell(&mut self, at: Point, color: Rgba) {
        // Overlapping brush positions along a line must not darken the stroke
        if let Some(i) = self.index(at.x, at.y) {
            if self.pixels[i] != color.over(Rgba::TRANSPARENT) || color.a == 255 {
                self.pixels[i] = color.over(self.pixels[i]);
            }
        }
    }

    /// Pixels in ARGB32 network byte order, as StatusNotifier icons expect
    pub fn to_argb32(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.a, p.r, p.g, p.b])
            .collect()
    }
}

impl Canvas for Pixmap {
    fn line(&mut self, from: Point, to: Point, pen: Pen) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.stamp(from, pen);
            return;
        }
        for step in 0..=steps {
            let x = from.x as f32 + dx as f32 * step as f32 / steps as f32;
            let y = from.y as f32 + dy as f32 * step as f32 / steps as f32;
            self.stamp(Point::new(x.round() as i32, y.round() as i32), pen);
        }
    }

    fn point(&mut self, at: Point, pen: Pen) {
        self.stamp(at, pen);
    }

    fn circle(&mut self, center: Point, diameter: f32, pen: Pen) {
        let radius = diameter / 2.0;
        let half_width = pen.width / 2.0;
        let reach = (radius + half_width).ceil() as i32;
        for y in -reach..=reach {
            for x in -reach..=reach {
                let distance = ((x * x + y * y) as f32).sqrt();
                if (distance - radius).abs() <= half_width {
                    self.blend(center.x + x, center.y + y, pen.color);
                }
            }
        }
    }

    fn image(&mut self, top_left: Point, image: &CustomImage) {
        for (i, px) in image.pixels().chunks_exact(4).enumerate() {
            let x = top_left.x + (i as u32 % image.width()) as i32;
            let y = top_left.y + (i as u32 / image.width()) as i32;
            self.blend(x, y, Rgba::new(px[0], px[1], px[2], px[3]));
        }
    }
}
