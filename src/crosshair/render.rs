//! Crosshair rendering model
//!
//! `render` turns a [`CrosshairConfig`] into a handful of primitive draw
//! calls on a [`Canvas`]. The same function paints the overlay window, the
//! settings preview and the tray icon, so every backend shows identical
//! geometry.

use crate::color::Rgba;
use crate::constants::outline;

use super::image::CustomImage;
use super::{CrosshairConfig, CrosshairStyle};

/// Integer canvas coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Stroke color and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgba,
    pub width: f32,
}

impl Pen {
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }

    /// Fixed styling of the outline ring
    pub const fn outline() -> Self {
        Self::new(outline::COLOR, outline::WIDTH)
    }
}

/// Drawing target for the crosshair
///
/// Coordinates are pixel positions inside the canvas.
pub trait Canvas {
    fn line(&mut self, from: Point, to: Point, pen: Pen);

    fn point(&mut self, at: Point, pen: Pen);

    /// Unfilled circle
    fn circle(&mut self, center: Point, diameter: f32, pen: Pen);

    fn image(&mut self, top_left: Point, image: &CustomImage);
}

/// Paint the configured crosshair centered at `center`
pub fn render(config: &CrosshairConfig, canvas: &mut impl Canvas, center: Point) {
    let arm = match config.style {
        CrosshairStyle::Cross => config.cross_length,
        CrosshairStyle::X => config.x_length,
        CrosshairStyle::Dot | CrosshairStyle::CustomImage => 0,
    };

    if config.style == CrosshairStyle::CustomImage {
        // A decoded image replaces everything else, including the outline
        if let Some(image) = &config.custom_image {
            let top_left = center.offset(
                -(image.width() as i32 / 2),
                -(image.height() as i32 / 2),
            );
            canvas.image(top_left, image);
            return;
        }
    }

    let pen = Pen::new(config.color, config.stroke_width as f32);
    match config.style {
        CrosshairStyle::Cross => {
            canvas.line(center.offset(0, -arm), center.offset(0, arm), pen);
            canvas.line(center.offset(-arm, 0), center.offset(arm, 0), pen);
        }
        CrosshairStyle::X => {
            canvas.line(center.offset(-arm, -arm), center.offset(arm, arm), pen);
            canvas.line(center.offset(-arm, arm), center.offset(arm, -arm), pen);
        }
        CrosshairStyle::Dot => canvas.point(center, pen),
        CrosshairStyle::CustomImage => {}
    }

    if config.show_outline {
        canvas.circle(center, (config.size - 1) as f32, Pen::outline());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawOp {
        Line(Point, Point, Pen),
        Point(Point, Pen),
        Circle(Point, f32, Pen),
        Image(Point, u32, u32),
    }

    /// Canvas that records every call instead of painting
    #[derive(Default)]
    pub(crate) struct RecordingCanvas {
        pub ops: Vec<DrawOp>,
    }

    impl Canvas for RecordingCanvas {
        fn line(&mut self, from: Point, to: Point, pen: Pen) {
            self.ops.push(DrawOp::Line(from, to, pen));
        }

        fn point(&mut self, at: Point, pen: Pen) {
            self.ops.push(DrawOp::Point(at, pen));
        }

        fn circle(&mut self, center: Point, diameter: f32, pen: Pen) {
            self.ops.push(DrawOp::Circle(center, diameter, pen));
        }

        fn image(&mut self, top_left: Point, image: &CustomImage) {
            self.ops.push(DrawOp::Image(top_left, image.width(), image.height()));
        }
    }

    fn config(style: CrosshairStyle) -> CrosshairConfig {
        CrosshairConfig {
            style,
            show_outline: false,
            ..CrosshairConfig::default()
        }
    }

    fn lines(ops: &[DrawOp]) -> Vec<(Point, Point)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Line(a, b, _) => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    fn with_image(mut config: CrosshairConfig, width: u32, height: u32) -> CrosshairConfig {
        config.custom_image_path = Some(PathBuf::from("/tmp/reticle.png"));
        config.custom_image = Some(CustomImage::from_rgba(
            width,
            height,
            vec![255; (width * height * 4) as usize],
        ));
        config
    }

    #[test]
    fn test_cross_scenario_at_100_100() {
        let mut cfg = config(CrosshairStyle::Cross);
        cfg.size = 24;
        cfg.cross_length = 10;
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(100, 100));

        assert_eq!(
            lines(&canvas.ops),
            vec![
                (Point::new(100, 90), Point::new(100, 110)),
                (Point::new(90, 100), Point::new(110, 100)),
            ]
        );
    }

    #[test]
    fn test_x_scenario_at_50_50() {
        let mut cfg = config(CrosshairStyle::X);
        cfg.x_length = 5;
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(50, 50));

        assert_eq!(
            lines(&canvas.ops),
            vec![
                (Point::new(45, 45), Point::new(55, 55)),
                (Point::new(45, 55), Point::new(55, 45)),
            ]
        );
    }

    #[test]
    fn test_cross_ignores_x_length() {
        let center = Point::new(32, 32);
        for cross_length in 1..=20 {
            let mut cfg = config(CrosshairStyle::Cross);
            cfg.cross_length = cross_length;
            cfg.x_length = 20 - cross_length + 1;
            let mut canvas = RecordingCanvas::default();

            render(&cfg, &mut canvas, center);

            let drawn = lines(&canvas.ops);
            assert_eq!(drawn.len(), 2);
            for (a, b) in drawn {
                // Both segments pass through the center with half-length cross_length
                assert_eq!((a.x + b.x) / 2, center.x);
                assert_eq!((a.y + b.y) / 2, center.y);
                let half = (b.x - a.x).abs().max((b.y - a.y).abs()) / 2;
                assert_eq!(half, cross_length);
            }
        }
    }

    #[test]
    fn test_x_endpoints_form_square() {
        let center = Point::new(10, 20);
        for x_length in 1..=20 {
            let mut cfg = config(CrosshairStyle::X);
            cfg.x_length = x_length;
            cfg.cross_length = 3;
            let mut canvas = RecordingCanvas::default();

            render(&cfg, &mut canvas, center);

            let mut corners: Vec<Point> = lines(&canvas.ops)
                .into_iter()
                .flat_map(|(a, b)| [a, b])
                .collect();
            corners.sort_by_key(|p| (p.x, p.y));
            assert_eq!(
                corners,
                vec![
                    center.offset(-x_length, -x_length),
                    center.offset(-x_length, x_length),
                    center.offset(x_length, -x_length),
                    center.offset(x_length, x_length),
                ]
            );
        }
    }

    #[test]
    fn test_dot_paints_single_point_with_pen() {
        let mut cfg = config(CrosshairStyle::Dot);
        cfg.stroke_width = 4;
        cfg.color = Rgba::opaque(255, 0, 0);
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(7, 7));

        assert_eq!(
            canvas.ops,
            vec![DrawOp::Point(Point::new(7, 7), Pen::new(Rgba::opaque(255, 0, 0), 4.0))]
        );
    }

    #[test]
    fn test_outline_uses_fixed_pen() {
        let mut cfg = config(CrosshairStyle::Cross);
        cfg.show_outline = true;
        cfg.size = 30;
        cfg.stroke_width = 7;
        cfg.color = Rgba::opaque(0, 255, 0);
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(15, 15));

        assert_eq!(
            canvas.ops.last(),
            Some(&DrawOp::Circle(Point::new(15, 15), 29.0, Pen::outline()))
        );
    }

    #[test]
    fn test_no_outline_when_disabled() {
        let mut canvas = RecordingCanvas::default();
        render(&config(CrosshairStyle::X), &mut canvas, Point::new(0, 0));
        assert!(!canvas.ops.iter().any(|op| matches!(op, DrawOp::Circle(..))));
    }

    #[test]
    fn test_arms_may_exceed_outline() {
        let mut cfg = config(CrosshairStyle::Cross);
        cfg.size = 8;
        cfg.cross_length = 20;
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(4, 4));

        assert_eq!(lines(&canvas.ops)[0], (Point::new(4, -16), Point::new(4, 24)));
    }

    #[test]
    fn test_custom_image_centered_without_outline() {
        let mut cfg = with_image(config(CrosshairStyle::CustomImage), 15, 10);
        cfg.show_outline = true;
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(100, 100));

        assert_eq!(canvas.ops, vec![DrawOp::Image(Point::new(93, 95), 15, 10)]);
    }

    #[test]
    fn test_custom_image_style_without_image_draws_no_shape() {
        let mut cfg = config(CrosshairStyle::CustomImage);
        cfg.size = 24;
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(100, 100));
        assert!(canvas.ops.is_empty());

        // Only the outline remains when it is enabled
        cfg.show_outline = true;
        render(&cfg, &mut canvas, Point::new(100, 100));
        assert_eq!(
            canvas.ops,
            vec![DrawOp::Circle(Point::new(100, 100), 23.0, Pen::outline())]
        );
    }

    #[test]
    fn test_image_ignored_for_other_styles() {
        let cfg = with_image(config(CrosshairStyle::Dot), 4, 4);
        let mut canvas = RecordingCanvas::default();

        render(&cfg, &mut canvas, Point::new(1, 1));

        assert!(!canvas.ops.iter().any(|op| matches!(op, DrawOp::Image(..))));
    }
}
